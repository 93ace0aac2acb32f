// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use sole_core::EndpointError;
use std::collections::VecDeque;

/// Listener replaying a fixed script, then idling
struct ScriptedListener {
    script: VecDeque<Result<(), EndpointError>>,
}

#[async_trait]
impl EndpointListener for ScriptedListener {
    async fn accept(&mut self) -> Result<(), EndpointError> {
        match self.script.pop_front() {
            Some(step) => step,
            None => std::future::pending().await,
        }
    }
}

fn identifier() -> Identifier {
    Identifier::new("listener-test").unwrap()
}

#[tokio::test]
async fn each_accept_becomes_one_notification() {
    let listener = ScriptedListener {
        script: VecDeque::from([Ok(()), Ok(()), Ok(())]),
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = spawn(listener, identifier(), tx);

    for _ in 0..3 {
        let event = rx.recv().await.unwrap();
        assert!(event.is_notified());
    }
    assert!(rx.try_recv().is_err());
    task.abort();
}

#[tokio::test]
async fn accept_errors_are_reported_and_loop_continues() {
    let listener = ScriptedListener {
        script: VecDeque::from([
            Err(EndpointError::Accept(std::io::Error::other("too many open files"))),
            Ok(()),
        ]),
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = spawn(listener, identifier(), tx);

    let first = rx.recv().await.unwrap();
    assert!(matches!(
        first,
        InstanceEvent::Error(InstanceError::Listen(EndpointError::Accept(_)))
    ));
    let second = rx.recv().await.unwrap();
    assert!(second.is_notified());
    task.abort();
}

#[tokio::test]
async fn loop_stops_when_receiver_is_dropped() {
    let listener = ScriptedListener {
        script: VecDeque::from([Ok(())]),
    };
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);

    let task = spawn(listener, identifier(), tx);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("loop should stop")
        .unwrap();
}
