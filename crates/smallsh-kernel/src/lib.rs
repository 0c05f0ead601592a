//! smallsh-kernel: the core of smallsh.
//!
//! This crate provides:
//!
//! - **Context**: immutable shell state threaded through every command
//! - **Command**: the contract every builtin and plugin satisfies
//! - **Registry**: name → command lookup, fed by registry providers
//! - **Dispatcher**: line → tokens → command → new context
//! - **Kernel**: one-time startup assembly of the above
//!
//! The interactive loop lives in `smallsh-repl`.

pub mod builtin;
pub mod command;
pub mod context;
pub mod dispatch;
pub mod io;
pub mod kernel;
pub mod plugin;
pub mod provider;
pub mod registry;

pub use command::{Command, CommandError, Outcome};
pub use context::{Context, DEFAULT_PROMPT};
pub use dispatch::{DispatchError, handle, tokenize};
pub use io::{CaptureBuffer, InputSource, LineRead, OutputSink};
pub use kernel::{Kernel, KernelConfig, KernelError, load_registry};
pub use plugin::{PluginCommand, PluginDirProvider};
pub use provider::{BuiltinProvider, ProviderError, RegistryProvider, StaticProvider};
pub use registry::{CommandRegistry, RegistryError};
