//! Runtime device-tree overlay application.
//!
//! The running kernel's device-tree and module state is global to the whole
//! process. [`OverlayState`] is the single handle onto it: it forwards
//! requests to an [`OverlayLoader`] and keeps an append-only record of what
//! has been applied. Nothing is ever removed, so the order of requests
//! across candidates is the only thing that decides the resulting state.

use parking_lot::Mutex;

use crate::error::{BoardError, BoardResult};
use crate::utils::command::{elevated, CommandRunner};

/// The primitive that applies kernel parameters, overlays and modules.
///
/// Every token that takes effect is pushed onto `done` right away, so a
/// request that fails partway still reports what reached the kernel.
/// Implementations must be additive: applying a superset later must not
/// fail or leave conflicting state behind.
pub trait OverlayLoader {
    fn apply(
        &self,
        params: &[String],
        overlays: &[String],
        modules: &[String],
        done: &mut AppliedOverlays,
    ) -> BoardResult<()>;
}

/// Everything applied so far in this process, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedOverlays {
    pub params: Vec<String>,
    pub overlays: Vec<String>,
    pub modules: Vec<String>,
}

impl AppliedOverlays {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.overlays.is_empty() && self.modules.is_empty()
    }

    pub fn has_overlay(&self, token: &str) -> bool {
        self.overlays.iter().any(|o| o == token)
    }

    fn append(&mut self, other: AppliedOverlays) {
        self.params.extend(other.params);
        self.overlays.extend(other.overlays);
        self.modules.extend(other.modules);
    }
}

/// Process-wide, append-only view of the kernel overlay state
pub struct OverlayState {
    loader: Box<dyn OverlayLoader>,
    applied: Mutex<AppliedOverlays>,
}

impl OverlayState {
    pub fn new(loader: impl OverlayLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            applied: Mutex::new(AppliedOverlays::default()),
        }
    }

    /// Apply the given tokens in order.
    ///
    /// Tokens already applied by an earlier request are not sent again. The
    /// record grows by every token the loader confirmed, also when the
    /// request as a whole fails.
    pub fn apply(&self, params: &[&str], overlays: &[&str], modules: &[String]) -> BoardResult<()> {
        let mut applied = self.applied.lock();

        let params = pending(params.iter().copied(), &applied.params);
        let overlays = pending(overlays.iter().copied(), &applied.overlays);
        let modules = pending(modules.iter().map(String::as_str), &applied.modules);

        if params.is_empty() && overlays.is_empty() && modules.is_empty() {
            log::debug!("overlay request already satisfied");
            return Ok(());
        }

        log::info!(
            "Applying {} params, {} overlays, {} modules",
            params.len(),
            overlays.len(),
            modules.len()
        );
        let mut done = AppliedOverlays::default();
        let result = self.loader.apply(&params, &overlays, &modules, &mut done);
        if result.is_err() && !done.is_empty() {
            log::warn!(
                "overlay request failed after {} params, {} overlays, {} modules took effect",
                done.params.len(),
                done.overlays.len(),
                done.modules.len()
            );
        }
        applied.append(done);
        result
    }

    /// Snapshot of everything applied so far
    pub fn applied(&self) -> AppliedOverlays {
        self.applied.lock().clone()
    }
}

impl std::fmt::Debug for OverlayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayState")
            .field("applied", &*self.applied.lock())
            .finish_non_exhaustive()
    }
}

/// Tokens from `requested` not yet in `done`, first occurrence only
fn pending<'a>(requested: impl Iterator<Item = &'a str>, done: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in requested {
        if !done.iter().any(|d| d == token) && !out.iter().any(|o| o == token) {
            out.push(token.to_string());
        }
    }
    out
}

/// Loader built on the Raspberry Pi runtime tools.
///
/// Parameters go through `dtparam`, overlays through `dtoverlay` (the token
/// is split on whitespace into name and arguments) and modules through
/// `modprobe`. Tokens whose first word is a `key=value` directive only have
/// meaning in the boot configuration and are skipped at runtime.
pub struct CommandOverlayLoader<R: CommandRunner> {
    runner: R,
    use_sudo: bool,
}

impl<R: CommandRunner> CommandOverlayLoader<R> {
    pub fn new(runner: R, use_sudo: bool) -> Self {
        Self { runner, use_sudo }
    }

    fn run(&self, program: &str, args: Vec<String>, token: &str) -> BoardResult<()> {
        let (program, args) = elevated(self.use_sudo, program, args);
        self.runner
            .run(&program, &args)
            .map_err(|e| BoardError::overlay(token, e.to_string()))
    }
}

impl<R: CommandRunner> OverlayLoader for CommandOverlayLoader<R> {
    fn apply(
        &self,
        params: &[String],
        overlays: &[String],
        modules: &[String],
        done: &mut AppliedOverlays,
    ) -> BoardResult<()> {
        for param in params {
            self.run("dtparam", vec![param.clone()], param)?;
            done.params.push(param.clone());
        }

        for overlay in overlays {
            let args: Vec<String> = overlay.split_whitespace().map(str::to_string).collect();
            match args.first() {
                None => return Err(BoardError::overlay(overlay, "empty overlay token")),
                Some(head) if head.contains('=') => {
                    log::debug!("'{}' is a boot config directive, skipped at runtime", overlay);
                }
                Some(_) => self.run("dtoverlay", args, overlay)?,
            }
            done.overlays.push(overlay.clone());
        }

        for module in modules {
            self.run("modprobe", vec![module.clone()], module)?;
            done.modules.push(module.clone());
        }
        Ok(())
    }
}
