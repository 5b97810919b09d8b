use std::time::Instant;
use serde::{Serialize, Deserialize};




/**
 * A side-effect such as data output or progress reporting, performed at
 * regular intervals of simulation time
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct RecurringTask {

    /// The number of times this task has been performed
    pub count: usize,

    /// The next simulation time at which this task is due
    pub next_time: f64,

    /// The last clock time when this task was performed
    #[serde(skip, default = "Instant::now")]
    pub last_performed: Instant,
}




/**
 * All the recurring tasks used in this application
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct Tasks {

    /// Write a snapshot of the full simulation
    pub write_checkpoint: RecurringTask,
}




// ============================================================================
impl RecurringTask {

    /**
     * A fresh task, first due at t = 0.
     */
    pub fn new() -> Self {
        Self {
            count: 0,
            next_time: 0.0,
            last_performed: Instant::now(),
        }
    }

    pub fn is_due(&self, time: f64) -> bool {
        time >= self.next_time
    }

    /**
     * Mark the task as just performed and schedule the next occurrence.
     */
    pub fn advance(&mut self, interval: f64) {
        self.count += 1;
        self.next_time += interval;
        self.last_performed = Instant::now();
    }
}

impl Default for RecurringTask {
    fn default() -> Self {
        Self::new()
    }
}




// ============================================================================
impl Tasks {
    pub fn new() -> Self {
        Self {
            write_checkpoint: RecurringTask::new(),
        }
    }
}

impl Default for Tasks {
    fn default() -> Self {
        Self::new()
    }
}
