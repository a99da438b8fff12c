//! Concurrent access to one store directory from independent handles

use ctxstore::endpoint::{DockerEndpoint, EndpointKind};
use ctxstore::error::ErrorKind;
use ctxstore::store::ContextStore;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const RACERS: usize = 8;

#[test]
fn test_racing_creates_have_exactly_one_winner() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let barrier = Arc::new(Barrier::new(RACERS));

    let handles: Vec<_> = (0..RACERS)
        .map(|i| {
            let root = root.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Each racer opens its own handle, as separate processes would
                let store = ContextStore::open(&root).unwrap();
                let endpoint = DockerEndpoint {
                    host: Some(format!("tcp://racer-{}:2376", i)),
                    ..Default::default()
                };
                barrier.wait();
                store
                    .create("race", EndpointKind::Docker, &format!("racer {}", i), endpoint.into())
                    .map(|()| i)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<usize> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
    assert_eq!(winners.len(), 1, "exactly one create should succeed");
    for result in &results {
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::AlreadyExists);
        }
    }

    // The stored record is wholly the winner's
    let stored = ContextStore::open(&root).unwrap().get("race").unwrap();
    let winner = winners[0];
    assert_eq!(stored.description, format!("racer {}", winner));
    assert_eq!(
        stored
            .endpoint(EndpointKind::Docker)
            .and_then(|e| e.as_docker())
            .and_then(|d| d.host.clone()),
        Some(format!("tcp://racer-{}:2376", winner))
    );

    let leftovers = std::fs::read_dir(root.join("contexts")).unwrap().count();
    assert_eq!(leftovers, 1, "temp files must be cleaned up");
}

#[test]
fn test_readers_never_see_partial_records() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let writer_store = ContextStore::open(&root).unwrap();

    let reader_root = root.clone();
    let reader = thread::spawn(move || {
        let store = ContextStore::open(&reader_root).unwrap();
        let mut seen = 0;
        for _ in 0..200 {
            for summary in &store.list().unwrap() {
                // Any error here would mean a torn or foreign record was read
                summary.unwrap();
                seen += 1;
            }
        }
        seen
    });

    for i in 0..50 {
        writer_store
            .create(
                &format!("ctx-{:02}", i),
                EndpointKind::Docker,
                "",
                DockerEndpoint::default().into(),
            )
            .unwrap();
    }

    reader.join().unwrap();
    assert_eq!(writer_store.len().unwrap(), 50);
}

#[test]
fn test_shared_handle_across_threads() {
    let store = Arc::new(ContextStore::in_memory());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .create(
                        &format!("t{}", i),
                        EndpointKind::Docker,
                        "",
                        DockerEndpoint::default().into(),
                    )
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len().unwrap(), 4);
}
