// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn pending_tasks_wire_shape() {
    let body: PendingTasks =
        serde_json::from_str(r#"{"pendingTasks": 27, "provisionerId": "proj-autophone"}"#)
            .unwrap();
    assert_eq!(body.pending_tasks, 27);
}

#[test]
fn queue_root_trailing_slash_is_trimmed() {
    let queue = TaskclusterQueue::new("https://queue.example.net/v1/").unwrap();
    assert_eq!(queue.root, "https://queue.example.net/v1");
}

#[test]
fn fake_queue_defaults_to_no_demand() {
    let queue = FakeQueue::new();
    assert_eq!(queue.pending("proj-autophone", "unit-p2"), 0);
    queue.set_pending("unit-p2", 4);
    assert_eq!(queue.pending("proj-autophone", "unit-p2"), 4);
}
