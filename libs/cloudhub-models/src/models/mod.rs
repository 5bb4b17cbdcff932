//! API models

pub mod accounts;
pub mod application;
pub mod scope;

/// Serde helper for `skip_serializing_if` on plain booleans
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Treats an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
