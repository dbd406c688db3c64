use std::collections::BTreeMap;

use crate::error::Result;

/// Named scalar results of one epoch, shared by every hook that runs after it.
pub type EpochLogs = BTreeMap<String, f64>;

/// Something to run once an epoch has finished.
///
/// Hooks may read and extend `logs`; later hooks observe what earlier ones
/// wrote. An error aborts the epoch's remaining hooks.
pub trait EpochHook<M: ?Sized> {
    fn on_epoch_end(&mut self, epoch: usize, model: &mut M, logs: &mut EpochLogs) -> Result<()>;
}

/// Ordered collection of hooks invoked as one.
pub struct HookList<M: ?Sized> {
    hooks: Vec<Box<dyn EpochHook<M>>>,
}

impl<M: ?Sized> HookList<M> {
    pub fn new() -> Self {
        HookList { hooks: Vec::new() }
    }

    pub fn push(&mut self, hook: impl EpochHook<M> + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<M: ?Sized> Default for HookList<M> {
    fn default() -> Self {
        HookList::new()
    }
}

impl<M: ?Sized> EpochHook<M> for HookList<M> {
    fn on_epoch_end(&mut self, epoch: usize, model: &mut M, logs: &mut EpochLogs) -> Result<()> {
        for hook in &mut self.hooks {
            hook.on_epoch_end(epoch, model, logs)?;
        }
        Ok(())
    }
}
