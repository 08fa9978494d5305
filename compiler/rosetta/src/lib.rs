//! Rosetta - Retargetable Operation Translation
//!
//! Translates a generic operation tree into source text for one target.
//!
//! # Architecture
//!
//! ```text
//! generic Node tree (from a front end)
//!     │
//!     ▼
//! Resolver::resolve ──► target-shaped Node tree    (Registry)
//!     │
//!     ▼
//! render ──► source text                           (TemplateSet)
//! ```
//!
//! A [`Target`] bundles the two tables. It is built once, never mutated, and
//! can be shared by any number of concurrent [`translate`] calls.
//!
//! # Example
//!
//! ```ignore
//! let ruby = rosetta::targets::ruby()?;
//! let translation = rosetta::translate(&ruby, &program)?;
//! println!("{}", translation.code);
//! ```

use std::collections::BTreeSet;
use std::sync::Once;

pub mod targets;

pub use rosetta_ir::{GenericType, Namespace, Node, NodeKind, NodeTag, SemanticType, TranslateError};
pub use rosetta_render::{DuplicateTemplate, Template, TemplateSet};
pub use rosetta_resolve::Resolver;
pub use rosetta_rules::{Registry, RuleSet, TypeRules};

/// Tables for one target language.
#[derive(Debug)]
pub struct Target {
    registry: Registry,
    templates: TemplateSet,
}

impl Target {
    pub fn new(registry: Registry, templates: TemplateSet) -> Self {
        Target {
            registry,
            templates,
        }
    }

    /// Target name, as carried by its registry.
    pub fn name(&self) -> &str {
        self.registry.target()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }
}

/// Output of a translation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    /// Rendered target source.
    pub code: String,
    /// Libraries the code needs, in sorted order.
    pub dependencies: BTreeSet<String>,
}

/// Resolve `program` against `target` and render the result.
#[tracing::instrument(level = "debug", skip_all, fields(target = target.name()))]
pub fn translate(target: &Target, program: &Node) -> Result<Translation, TranslateError> {
    let mut resolver = Resolver::new(&target.registry, &target.templates);
    let resolved = resolver.resolve(program)?;
    let code = rosetta_render::render(&resolved, &target.templates)?;
    let dependencies = resolver.finish();

    tracing::debug!(
        bytes = code.len(),
        dependencies = dependencies.len(),
        "translate complete"
    );
    Ok(Translation { code, dependencies })
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
