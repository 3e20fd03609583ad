//! Runtime filter swapping

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::error::{LogError, LogResult};

pub(super) type FilterLayer = reload::Layer<EnvFilter, Registry>;

/// Changes the installed filter without reinstalling the subscriber
#[derive(Clone)]
pub struct ReloadHandle {
    inner: reload::Handle<EnvFilter, Registry>,
    directive: Arc<ArcSwap<String>>,
}

impl ReloadHandle {
    /// Wrap `filter` in a reload layer and return the handle controlling it
    pub(super) fn wrap(filter: EnvFilter, directive: &str) -> (FilterLayer, Self) {
        let (layer, inner) = reload::Layer::new(filter);
        let handle = Self {
            inner,
            directive: Arc::new(ArcSwap::from_pointee(directive.to_owned())),
        };
        (layer, handle)
    }

    /// Replace the filter with `directive`
    ///
    /// On a parse error the previous filter stays active.
    pub fn reload(&self, directive: &str) -> LogResult<()> {
        let filter = EnvFilter::try_new(directive).map_err(|e| LogError::filter(directive, e))?;
        self.inner
            .reload(filter)
            .map_err(|e| LogError::Reload(e.to_string()))?;
        self.directive.store(Arc::new(directive.to_owned()));
        Ok(())
    }

    /// Directive of the active filter
    pub fn current_filter(&self) -> Arc<String> {
        self.directive.load_full()
    }
}

impl std::fmt::Debug for ReloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadHandle")
            .field("current_filter", &*self.directive.load_full())
            .finish_non_exhaustive()
    }
}
