//! Periodic tick driver
//!
//! Runs the simulation on its own thread at a fixed cadence. The whole
//! simulation sits behind one mutex: a tick holds it for its computation and
//! commit, commands hold it while they apply, and readers get a cloned
//! snapshot.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use super::command::Command;
use super::state::SimState;
use super::world::AccSim;

pub type SharedSim = Arc<Mutex<AccSim>>;

pub struct SimDriver {
    sim: SharedSim,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

fn lock_sim(sim: &SharedSim) -> MutexGuard<'_, AccSim> {
    match sim.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            // Ticks commit whole states, so the inner value is still consistent
            warn!("Simulation lock poisoned, recovering last committed state");
            poisoned.into_inner()
        }
    }
}

impl SimDriver {
    /// Move `sim` onto a worker thread ticking once per `period`
    pub fn spawn(sim: AccSim, period: Duration) -> Self {
        let sim: SharedSim = Arc::new(Mutex::new(sim));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let worker_sim = Arc::clone(&sim);
        let worker = thread::spawn(move || {
            info!("Tick driver started ({} ms period)", period.as_millis());
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        lock_sim(&worker_sim).tick();
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("Tick driver stopped");
        });

        Self {
            sim,
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        }
    }

    /// Copy of the last committed state
    pub fn snapshot(&self) -> SimState {
        lock_sim(&self.sim).snapshot()
    }

    /// Simulated time of the last committed tick (ms)
    pub fn time_ms(&self) -> u64 {
        lock_sim(&self.sim).time_ms()
    }

    pub fn summary(&self) -> String {
        lock_sim(&self.sim).summary()
    }

    /// Apply a command between ticks
    pub fn send(&self, command: Command) -> bool {
        command.apply(&mut lock_sim(&self.sim))
    }

    /// Stop ticking and wait for the worker to exit
    pub fn stop(mut self) -> AccSim {
        self.shutdown();
        let sim = lock_sim(&self.sim).clone();
        sim
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The worker may already be gone; either way it is told to exit
            let _ = stop_tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Tick driver thread panicked");
            }
        }
    }
}

impl Drop for SimDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
