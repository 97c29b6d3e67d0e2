//! Fixture provisioning
//!
//! Scenario groups declare the records they need; the provisioner makes
//! sure they exist before the group runs and hands them over in an explicit
//! [`FixtureSet`] keyed by alias. Provisioning is idempotent within a run:
//! the registry memoizes (kind, logical name), so the backend sees at most
//! one create per distinct logical name.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::{HarnessError, HarnessResult};
use crate::record::{Record, RecordKind, RunId};

/// Minimal valid attributes for a record about to be created
#[derive(Debug, Clone)]
pub struct RecordSpec {
    pub name: String,
    pub description: Option<String>,
    /// Kind-specific fields: related record ids, playbook name, ...
    pub extra: Map<String, Value>,
}

impl RecordSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            extra: Map::new(),
        }
    }

    pub fn relate(&mut self, field: &str, id: u64) {
        self.extra.insert(field.to_string(), json!(id));
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.extra.insert(field.to_string(), json!(value.into()));
    }
}

/// A fixture a scenario group asks for before it runs
#[derive(Debug, Clone)]
pub struct FixtureRequest {
    pub kind: RecordKind,
    pub logical_name: String,
    pub alias: String,
}

impl FixtureRequest {
    pub fn new(kind: RecordKind, logical_name: &str, alias: &str) -> Self {
        Self {
            kind,
            logical_name: logical_name.to_string(),
            alias: alias.to_string(),
        }
    }
}

/// Alias -> record bindings for one scenario group
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    records: HashMap<String, Record>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: &str, record: Record) {
        self.records.insert(alias.to_string(), record);
    }

    pub fn get(&self, alias: &str) -> HarnessResult<&Record> {
        self.records
            .get(alias)
            .ok_or_else(|| HarnessError::UnknownAlias(alias.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Idempotent create-or-reuse provisioner over a [`Backend`]
pub struct Provisioner<B: Backend> {
    backend: B,
    run: RunId,
    registry: HashMap<(RecordKind, String), Record>,
}

impl<B: Backend> Provisioner<B> {
    pub fn new(backend: B, run: RunId) -> Self {
        Self {
            backend,
            run,
            registry: HashMap::new(),
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run
    }

    /// Make sure a record for (kind, logical name) exists and return it.
    ///
    /// Transitive dependencies (owning organization, inventory/project for a
    /// job template) are provisioned first, through the same registry, so
    /// shared dependencies resolve to one record. A backend rejection is
    /// surfaced as-is: setup failures are fatal to the dependent scenario
    /// group and never retried.
    pub async fn ensure(&mut self, kind: RecordKind, logical_name: &str) -> HarnessResult<Record> {
        let mut chain = vec![(kind, logical_name.to_string())];
        let mut i = 0;
        while i < chain.len() {
            let k = chain[i].0;
            for (dep_kind, dep_logical) in k.dependencies() {
                chain.push((*dep_kind, dep_logical.to_string()));
            }
            i += 1;
        }

        // Leaf dependencies first, the requested record last.
        for (k, logical) in chain.iter().rev() {
            self.ensure_single(*k, logical).await?;
        }

        self.registered(kind, logical_name)
    }

    async fn ensure_single(&mut self, kind: RecordKind, logical_name: &str) -> HarnessResult<()> {
        let key = (kind, logical_name.to_string());
        if self.registry.contains_key(&key) {
            return Ok(());
        }

        let name = self.run.scoped_name(logical_name);
        let spec = self.build_spec(kind, &name)?;

        let record = match self.backend.find_by_name(kind, &name).await? {
            Some(existing) => {
                // A leftover with this exact name can only come from an
                // earlier run reusing the same run id. Its relations may be
                // stale, so overwrite rather than trust it.
                debug!(kind = %kind, name = %name, id = existing.id, "replacing stale record");
                self.backend.delete(kind, existing.id).await?;
                self.backend.create(kind, &spec).await?
            }
            None => {
                info!(kind = %kind, name = %name, "provisioning fixture");
                self.backend.create(kind, &spec).await?
            }
        };

        self.registry.insert(key, record);
        Ok(())
    }

    fn build_spec(&self, kind: RecordKind, name: &str) -> HarnessResult<RecordSpec> {
        let mut spec = RecordSpec::named(name);
        match kind {
            RecordKind::Organization => {}
            RecordKind::Team | RecordKind::Project | RecordKind::Inventory => {
                let org = self.registered(RecordKind::Organization, "fixture-org")?;
                spec.relate("organization", org.id);
            }
            RecordKind::JobTemplate => {
                let inv = self.registered(RecordKind::Inventory, "fixture-inv")?;
                let project = self.registered(RecordKind::Project, "fixture-project")?;
                spec.relate("inventory", inv.id);
                spec.relate("project", project.id);
                spec.set("playbook", "ping.yml");
            }
        }
        Ok(spec)
    }

    fn registered(&self, kind: RecordKind, logical_name: &str) -> HarnessResult<Record> {
        self.registry
            .get(&(kind, logical_name.to_string()))
            .cloned()
            .ok_or_else(|| HarnessError::UnknownAlias(format!("{kind}:{logical_name}")))
    }

    /// Provision every fixture a scenario group requested
    pub async fn provision(&mut self, requests: &[FixtureRequest]) -> HarnessResult<FixtureSet> {
        let mut set = FixtureSet::new();
        for request in requests {
            let record = self.ensure(request.kind, &request.logical_name).await?;
            set.insert(&request.alias, record);
        }
        Ok(set)
    }
}
