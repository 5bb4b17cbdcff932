//! Deployment unit FSM tests

use chdeployer::deploy::fsm::{UnitEvent, UnitFsm, UnitState};

fn fsm_at(events: Vec<UnitEvent>) -> UnitFsm {
    let mut fsm = UnitFsm::new();
    for event in events {
        fsm.process(event).unwrap();
    }
    fsm
}

#[test]
fn test_fsm_initial_state() {
    let fsm = UnitFsm::new();
    assert_eq!(fsm.state(), UnitState::Pending);
    assert!(fsm.error().is_none());
}

#[test]
fn test_fsm_create_flow() {
    let mut fsm = fsm_at(vec![
        UnitEvent::Admit,
        UnitEvent::Load,
        UnitEvent::Resolve,
        UnitEvent::Fetch,
    ]);
    assert_eq!(fsm.state(), UnitState::Fetching);

    // Fetching -> Creating
    fsm.process(UnitEvent::Create).unwrap();
    assert_eq!(fsm.state(), UnitState::Creating);

    // Creating -> Succeeded
    fsm.process(UnitEvent::Succeed).unwrap();
    assert_eq!(fsm.state(), UnitState::Succeeded);
    assert!(fsm.state().is_terminal());
}

#[test]
fn test_fsm_skip_flow() {
    let mut fsm = fsm_at(vec![
        UnitEvent::Admit,
        UnitEvent::Load,
        UnitEvent::Resolve,
        UnitEvent::Fetch,
        UnitEvent::Compare,
        UnitEvent::Skip,
    ]);
    assert_eq!(fsm.state(), UnitState::Skipping);

    fsm.process(UnitEvent::Succeed).unwrap();
    assert_eq!(fsm.state(), UnitState::Succeeded);
}

#[test]
fn test_fsm_failure_from_any_step() {
    let steps = [
        vec![],
        vec![UnitEvent::Admit],
        vec![UnitEvent::Admit, UnitEvent::Load, UnitEvent::Resolve],
        vec![
            UnitEvent::Admit,
            UnitEvent::Load,
            UnitEvent::Resolve,
            UnitEvent::Fetch,
            UnitEvent::Compare,
            UnitEvent::Update,
        ],
    ];

    for events in steps {
        let mut fsm = fsm_at(events);
        fsm.process(UnitEvent::Fail("test error".to_string())).unwrap();
        assert_eq!(fsm.state(), UnitState::Failed);
        assert_eq!(fsm.error(), Some("test error"));
    }
}

#[test]
fn test_fsm_terminal_states_are_final() {
    let mut failed = fsm_at(vec![UnitEvent::Fail("first".to_string())]);
    assert!(failed.process(UnitEvent::Fail("second".to_string())).is_err());
    assert!(failed.process(UnitEvent::Admit).is_err());
    assert_eq!(failed.error(), Some("first"));

    let mut succeeded = fsm_at(vec![
        UnitEvent::Admit,
        UnitEvent::Load,
        UnitEvent::Resolve,
        UnitEvent::Fetch,
        UnitEvent::Create,
        UnitEvent::Succeed,
    ]);
    assert!(succeeded.process(UnitEvent::Fail("late".to_string())).is_err());
    assert_eq!(succeeded.state(), UnitState::Succeeded);
}

#[test]
fn test_fsm_invalid_transition() {
    let mut fsm = UnitFsm::new();

    // Cannot load before admission
    assert!(fsm.process(UnitEvent::Load).is_err());
    assert_eq!(fsm.state(), UnitState::Pending);

    // Cannot update without comparing
    let mut fsm = fsm_at(vec![
        UnitEvent::Admit,
        UnitEvent::Load,
        UnitEvent::Resolve,
        UnitEvent::Fetch,
    ]);
    assert!(fsm.process(UnitEvent::Update).is_err());
}
