//! Shared test utilities for boardprobe_core integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use boardprobe_core::board::BoardCandidate;
use boardprobe_core::hardware::{AppliedOverlays, BusProber, OverlayLoader};
use boardprobe_core::{BoardError, BoardResult, SystemInfo};

pub const PI4_CPUINFO: &str = "Hardware\t: BCM2835\nModel\t\t: Raspberry Pi 4 Model B Rev 1.4\n";
pub const PI5_CPUINFO: &str = "Model\t\t: Raspberry Pi 5 Model B Rev 1.0\n";
pub const BOOKWORM: &str = "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nVERSION_CODENAME=bookworm\n";
pub const BULLSEYE: &str = "PRETTY_NAME=\"Raspbian GNU/Linux 11 (bullseye)\"\nVERSION_CODENAME=bullseye\n";

pub fn pi4(os_release: &str) -> SystemInfo {
    SystemInfo::new(PI4_CPUINFO, os_release)
}

pub fn pi5(os_release: &str) -> SystemInfo {
    SystemInfo::new(PI5_CPUINFO, os_release)
}

/// Answers only for a fixed set of addresses and records every probe
#[derive(Default)]
pub struct FakeProber {
    present: HashSet<(u8, u8)>,
    pub calls: RefCell<Vec<(u8, u8)>>,
}

impl FakeProber {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every expected device of `candidate` answers, nothing else does
    pub fn board(candidate: BoardCandidate) -> Self {
        Self {
            present: candidate
                .descriptor()
                .expected_devices
                .iter()
                .map(|d| (d.bus, d.address))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(u8, u8)> {
        self.calls.borrow().clone()
    }
}

impl BusProber for FakeProber {
    fn probe(&self, bus: u8, address: u8) -> bool {
        self.calls.borrow_mut().push((bus, address));
        self.present.contains(&(bus, address))
    }
}

/// One recorded overlay request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderCall {
    pub params: Vec<String>,
    pub overlays: Vec<String>,
    pub modules: Vec<String>,
}

pub type LoaderLog = Rc<RefCell<Vec<LoaderCall>>>;

/// Records requests; can be told to reject a number of leading requests
pub struct FakeLoader {
    log: LoaderLog,
    fail_next: Rc<Cell<usize>>,
}

impl FakeLoader {
    pub fn recording() -> (Self, LoaderLog) {
        Self::failing(0)
    }

    pub fn failing(count: usize) -> (Self, LoaderLog) {
        let log = LoaderLog::default();
        let loader = Self {
            log: log.clone(),
            fail_next: Rc::new(Cell::new(count)),
        };
        (loader, log)
    }
}

impl OverlayLoader for FakeLoader {
    fn apply(
        &self,
        params: &[String],
        overlays: &[String],
        modules: &[String],
        done: &mut AppliedOverlays,
    ) -> BoardResult<()> {
        if self.fail_next.get() > 0 {
            self.fail_next.set(self.fail_next.get() - 1);
            let token = overlays.first().cloned().unwrap_or_default();
            return Err(BoardError::overlay(token, "dtoverlay: failed to apply"));
        }
        self.log.borrow_mut().push(LoaderCall {
            params: params.to_vec(),
            overlays: overlays.to_vec(),
            modules: modules.to_vec(),
        });
        done.params.extend_from_slice(params);
        done.overlays.extend_from_slice(overlays);
        done.modules.extend_from_slice(modules);
        Ok(())
    }
}

/// Every overlay token the loader accepted, in order
pub fn loaded_overlays(log: &LoaderLog) -> Vec<String> {
    log.borrow()
        .iter()
        .flat_map(|call| call.overlays.iter().cloned())
        .collect()
}
