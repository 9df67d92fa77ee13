// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch key: the `(WorkflowId, BranchId)` pair that keys the branch
//! ordering map in the State Store.
//!
//! A branch has no status of its own — it is purely the serial-ordering
//! predicate over the job ids listed for this key (§3).

use crate::workflow::{BranchId, WorkflowId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchKey {
    pub workflow_id: WorkflowId,
    pub branch_id: BranchId,
}

impl BranchKey {
    pub fn new(workflow_id: WorkflowId, branch_id: BranchId) -> Self {
        Self {
            workflow_id,
            branch_id,
        }
    }
}
