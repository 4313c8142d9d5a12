use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use stopwatch_core::{Scheduler, DEFAULT_TICK_MS};

use crate::AppMsg;

enum PumpOp {
    Start(u64),
    Stop,
    Quit,
}

/// Posts `AppMsg::Pump` to the main loop at a fixed interval while started.
pub struct Pump {
    ctl: Sender<PumpOp>,
    running: bool,
    handle: Option<JoinHandle<()>>,
}

impl Pump {
    pub fn spawn(main: Sender<AppMsg>) -> Self {
        let (ctl, ops) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("pump".into())
            .spawn(move || pump_thread(ops, main))
            .map_err(|e| log::error!("can't spawn pump thread: {}", e))
            .ok();
        Self {
            ctl,
            running: false,
            handle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn shutdown(&mut self) {
        self.stop_ticking();
        self.ctl.send(PumpOp::Quit).ok();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Scheduler for Pump {
    fn start_ticking(&mut self, interval_ms: u64) {
        if !self.running {
            self.running = true;
            self.ctl.send(PumpOp::Start(interval_ms)).ok();
        }
    }

    fn stop_ticking(&mut self) {
        if self.running {
            self.running = false;
            self.ctl.send(PumpOp::Stop).ok();
        }
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn pump_thread(ops: Receiver<PumpOp>, main: Sender<AppMsg>) {
    let mut interval_ms = DEFAULT_TICK_MS;
    let mut running = false;

    loop {
        // Wait out the interval when running, block for a command when stopped
        let op = if running {
            match ops.recv_timeout(Duration::from_millis(interval_ms)) {
                Ok(op) => op,
                Err(RecvTimeoutError::Timeout) => {
                    if main.send(AppMsg::Pump).is_err() {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match ops.recv() {
                Ok(op) => op,
                Err(_) => break,
            }
        };

        match op {
            PumpOp::Start(ms) => {
                interval_ms = if ms == 0 { DEFAULT_TICK_MS } else { ms };
                running = true;
            }
            PumpOp::Stop => running = false,
            PumpOp::Quit => break,
        }
    }
    log::debug!("pump thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_posts_ticks_only_while_started() {
        let (tx, rx) = mpsc::channel();
        let mut pump = Pump::spawn(tx);

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        pump.start_ticking(1);
        assert!(pump.is_running());
        let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(msg, AppMsg::Pump));

        pump.stop_ticking();
        assert!(!pump.is_running());
        // Drain anything posted before the stop landed
        std::thread::sleep(Duration::from_millis(50));
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        pump.shutdown();
    }

    #[test]
    fn test_start_is_guarded() {
        let (tx, _rx) = mpsc::channel();
        let mut pump = Pump::spawn(tx);
        pump.start_ticking(5);
        pump.start_ticking(5);
        assert!(pump.is_running());
        pump.stop_ticking();
        pump.stop_ticking();
        assert!(!pump.is_running());
    }
}
