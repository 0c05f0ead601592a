//! The Kernel — startup assembly for a shell session.
//!
//! The Kernel asks each registry provider for its commands exactly once,
//! merges them, and produces the root [`Context`] every later dispatch is
//! derived from.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                       Kernel                          │
//! │  ┌──────────────┐   ┌──────────────┐                  │
//! │  │  builtin     │ → │              │   ┌───────────┐  │
//! │  │  provider    │   │ CommandReg.  │ → │  Context  │  │
//! │  ├──────────────┤   │ (merged,     │   │  (root)   │  │
//! │  │  plugin dir  │ → │  last wins)  │   └───────────┘  │
//! │  │  provider    │   │              │                  │
//! │  └──────────────┘   └──────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::context::{Context, DEFAULT_PROMPT};
use crate::plugin::PluginDirProvider;
use crate::provider::{BuiltinProvider, ProviderError, RegistryProvider};
use crate::registry::CommandRegistry;

/// Configuration for kernel initialization.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Initial prompt.
    pub prompt: String,
    /// Directory of executable plugins, if any.
    pub plugins_dir: Option<PathBuf>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            plugins_dir: None,
        }
    }
}

impl KernelConfig {
    /// The registry providers this configuration asks for, in merge order.
    pub fn providers(&self) -> Vec<Box<dyn RegistryProvider>> {
        let mut providers: Vec<Box<dyn RegistryProvider>> = vec![Box::new(BuiltinProvider)];
        if let Some(dir) = &self.plugins_dir {
            providers.push(Box::new(PluginDirProvider::new(dir)));
        }
        providers
    }
}

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("loading {provider} commands")]
    Provider {
        provider: String,
        #[source]
        source: ProviderError,
    },
}

/// Ask every provider once and merge the results, last writer wins.
pub fn load_registry(
    providers: &[Box<dyn RegistryProvider>],
) -> Result<CommandRegistry, KernelError> {
    let mut registry = CommandRegistry::new();
    for provider in providers {
        let loaded = provider.registry().map_err(|source| KernelError::Provider {
            provider: provider.name().to_string(),
            source,
        })?;
        tracing::debug!(provider = provider.name(), commands = loaded.len(), "provider loaded");
        registry.merge(loaded);
    }
    Ok(registry)
}

/// A fully initialized shell session.
#[derive(Debug)]
pub struct Kernel {
    ctx: Context,
}

impl Kernel {
    /// Initialize over the process's standard streams.
    pub fn new(config: KernelConfig) -> Result<Self, KernelError> {
        Self::with_context(config, Context::stdio())
    }

    /// Initialize on top of an existing context (custom streams, token).
    pub fn with_context(config: KernelConfig, ctx: Context) -> Result<Self, KernelError> {
        let providers = config.providers();
        Self::with_providers(config, ctx, &providers)
    }

    /// Initialize from an explicit provider list.
    pub fn with_providers(
        config: KernelConfig,
        ctx: Context,
        providers: &[Box<dyn RegistryProvider>],
    ) -> Result<Self, KernelError> {
        let registry = load_registry(providers)?;
        tracing::info!(commands = registry.len(), "command registry loaded");

        let ctx = ctx
            .with_prompt(config.prompt)
            .with_commands(Arc::new(registry));
        Ok(Self { ctx })
    }

    /// The root context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn into_context(self) -> Context {
        self.ctx
    }

    pub fn commands(&self) -> &CommandRegistry {
        self.ctx.commands()
    }
}
