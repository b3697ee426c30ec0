use controls::{
    FileStorage, MemoryStorage, STORAGE_KEY, Storage, clear_cube_state, load_cube_state,
    save_cube_state,
};
use cube_core::{Cube, CubeSession};

fn played_session() -> CubeSession {
    let mut session = CubeSession::new();
    session.scramble(&mut fastrand::Rng::with_seed(4), 12);
    for token in ["R", "U", "F'"] {
        session.apply_str(token).unwrap();
    }
    session.undo();
    session
}

#[test_log::test]
fn session_round_trips_through_memory() {
    let mut storage = MemoryStorage::new();
    assert_eq!(load_cube_state::<CubeSession>(&storage), None);

    let session = played_session();
    save_cube_state(&mut storage, &session);
    assert!(storage.get(STORAGE_KEY).unwrap().is_some());
    assert_eq!(load_cube_state(&storage), Some(session));

    clear_cube_state(&mut storage);
    assert!(storage.is_empty());
    assert_eq!(load_cube_state::<CubeSession>(&storage), None);
}

#[test_log::test]
fn session_round_trips_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().join("nested"));

    let session = played_session();
    save_cube_state(&mut storage, &session);
    assert!(dir.path().join("nested/rubiksCubeState.json").exists());

    let reopened = FileStorage::new(dir.path().join("nested"));
    assert_eq!(load_cube_state(&reopened), Some(session));

    clear_cube_state(&mut storage);
    clear_cube_state(&mut storage);
    assert_eq!(load_cube_state::<CubeSession>(&reopened), None);
}

#[test_log::test]
fn failures_are_swallowed() {
    let mut full = MemoryStorage::with_quota(10);
    save_cube_state(&mut full, &played_session());
    assert!(full.is_empty());

    let mut storage = MemoryStorage::new();
    storage.set(STORAGE_KEY, "{ not json").unwrap();
    assert_eq!(load_cube_state::<CubeSession>(&storage), None);

    storage.set(STORAGE_KEY, "").unwrap();
    assert_eq!(load_cube_state::<CubeSession>(&storage), None);
}

#[test_log::test]
fn corrupt_cube_states_are_rejected() {
    let mut cube = serde_json::to_value(Cube::solved()).unwrap();
    // Give the first corner a single twist, which no sequence of moves can do
    cube[0]["orientation"] = serde_json::json!(1);

    let mut storage = MemoryStorage::new();
    storage.set(STORAGE_KEY, &cube.to_string()).unwrap();
    assert_eq!(load_cube_state::<Cube>(&storage), None);
}
