//! Declarative parameter schema for VRP optimisation requests.
//!
//! [`RequestSchema`] assembles every node of the request format once and
//! exposes validation and documentation over it. Callers normally go
//! through [`validate_request`], which uses the process-wide
//! [`RequestSchema::shared`] instance.
//!
//! ```
//! use serde_json::json;
//!
//! let request = json!({
//!     "vrp": {
//!         "vehicles": [{ "id": "v1" }],
//!         "services": [{ "id": "s1", "activity": { "point_id": "p1", "duration": "0:05" } }]
//!     }
//! });
//! let canonical = vrp_params_schema::validate_request(&request).expect("valid request");
//! assert_eq!(canonical["vrp"]["services"][0]["activity"]["duration"], json!(300));
//! assert_eq!(canonical["vrp"]["services"][0]["visits_number"], json!(1));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod nodes;

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use serde_json::Value;
use vrp_params_core::{FieldDoc, SchemaError, SchemaNode, ValidationErrors};

pub use nodes::{
    FIRST_SOLUTION_STRATEGIES, PARTITION_ENTITIES, PARTITION_METHODS, ROUTER_DIMENSIONS,
};

static SHARED: LazyLock<RequestSchema> = LazyLock::new(build_shared);

#[expect(
    clippy::expect_used,
    reason = "the request schema is static; a defect is a programming error caught by tests"
)]
fn build_shared() -> RequestSchema {
    RequestSchema::build().expect("request schema declarations are well formed")
}

/// The complete, frozen schema of a VRP request.
#[derive(Debug)]
pub struct RequestSchema {
    root: Arc<SchemaNode>,
    nodes: BTreeMap<&'static str, Arc<SchemaNode>>,
}

impl RequestSchema {
    /// Assemble every node of the request format.
    ///
    /// # Errors
    /// Returns [`SchemaError`] when a declaration breaks a structural
    /// invariant.
    pub fn build() -> Result<Self, SchemaError> {
        let (root, nodes) = nodes::NodeSet::assemble()?;
        log::debug!("request schema built with {} nodes", nodes.len());
        Ok(Self { root, nodes })
    }

    /// Process-wide schema, built on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Root node describing the request document.
    #[must_use]
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Look up a node by name, for example `"timewindow"`.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Arc<SchemaNode>> {
        self.nodes.get(name)
    }

    /// Names of every node, sorted.
    pub fn node_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.keys().copied()
    }

    /// Validate and canonicalise a request document.
    ///
    /// # Errors
    /// Returns every violation found in the document.
    pub fn validate(&self, document: &Value) -> Result<Value, ValidationErrors> {
        vrp_params_core::validate(document, &self.root)
    }

    /// Published fields of the request format, depth first.
    #[must_use]
    pub fn describe(&self) -> Vec<FieldDoc> {
        vrp_params_core::describe(&self.root)
    }
}

/// Validate a request against the shared schema.
///
/// # Errors
/// Returns every violation found in the document.
pub fn validate_request(document: &Value) -> Result<Value, ValidationErrors> {
    RequestSchema::shared().validate(document)
}
