use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::builtins;
use crate::error::{HullError, HullResult};
use crate::ladder::{LadderVariant, LADDER_LEGACY_ID, LADDER_SINGLE_ID};
use crate::template::{ModuleDoc, ModuleTemplate, ModuleType};

/// An entry of the insert menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertChoice {
    pub id: String,
    pub label: String,
    /// Set when the choice cannot be used at the requested site.
    pub disabled_reason: Option<String>,
}

/// Immutable library of module templates, shared by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<Arc<ModuleTemplate>>,
    by_id: HashMap<String, usize>,
    aliases: HashMap<String, String>,
    cockpit: Arc<ModuleTemplate>,
    cargo: Arc<ModuleTemplate>,
}

impl Catalog {
    /// The built-in templates.
    pub fn standard() -> HullResult<Self> {
        Self::from_templates(builtins::standard_templates())
    }

    /// Validate and index templates. Exactly one fixed cockpit and one fixed
    /// cargo template must be present.
    pub fn from_templates(templates: Vec<ModuleTemplate>) -> HullResult<Self> {
        let mut by_id = HashMap::new();
        let mut list = Vec::with_capacity(templates.len());
        for t in templates {
            t.validate()?;
            by_id.insert(t.id.clone(), list.len());
            list.push(Arc::new(t));
        }
        let cockpit = Self::find_end_cap(&list, ModuleType::Cockpit)?;
        let cargo = Self::find_end_cap(&list, ModuleType::Cargo)?;

        let mut aliases = HashMap::new();
        if by_id.contains_key(LADDER_SINGLE_ID) {
            aliases.insert(LADDER_LEGACY_ID.to_string(), LADDER_SINGLE_ID.to_string());
        }
        debug!(templates = list.len(), "catalog indexed");
        Ok(Self { templates: list, by_id, aliases, cockpit, cargo })
    }

    /// Parse a JSON array of module documents.
    pub fn from_json(json: &str) -> HullResult<Self> {
        let docs: Vec<ModuleDoc> = serde_json::from_str(json).map_err(HullError::CatalogParse)?;
        let templates = docs
            .into_iter()
            .map(ModuleDoc::into_template)
            .collect::<HullResult<Vec<_>>>()?;
        Self::from_templates(templates)
    }

    fn find_end_cap(list: &[Arc<ModuleTemplate>], module_type: ModuleType) -> HullResult<Arc<ModuleTemplate>> {
        let mut caps = list.iter().filter(|t| t.fixed && t.module_type == module_type);
        let first = caps.next().ok_or(HullError::MissingEndCap { module_type })?;
        if caps.next().is_some() {
            return Err(HullError::DuplicateEndCap { module_type });
        }
        Ok(Arc::clone(first))
    }

    /// Resolve legacy aliases to the canonical id.
    pub fn canonical_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(self.canonical_id(id))
    }

    pub fn get(&self, id: &str) -> HullResult<&Arc<ModuleTemplate>> {
        self.by_id
            .get(self.canonical_id(id))
            .map(|i| &self.templates[*i])
            .ok_or_else(|| HullError::UnknownTemplate { id: id.to_string() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ModuleTemplate>> {
        self.templates.iter()
    }

    pub fn is_fixed_type(&self, module_type: ModuleType) -> bool {
        self.templates.iter().any(|t| t.fixed && t.module_type == module_type)
    }

    pub fn is_battery_supply(&self, id: &str) -> bool {
        self.get(id).map(|t| t.battery_supply).unwrap_or(false)
    }

    pub fn is_ladder(&self, id: &str) -> bool {
        self.get(id).map(|t| t.is_ladder()).unwrap_or(false)
    }

    pub fn cockpit(&self) -> &Arc<ModuleTemplate> {
        &self.cockpit
    }

    pub fn cargo(&self) -> &Arc<ModuleTemplate> {
        &self.cargo
    }

    /// Template for a ladder variant, falling back to the single variant when
    /// the catalog lacks the requested one.
    pub fn ladder_template(&self, variant: LadderVariant) -> HullResult<&Arc<ModuleTemplate>> {
        self.get(variant.template_id()).or_else(|_| self.get(LADDER_SINGLE_ID))
    }

    /// Insertable, non-fixed templates sorted by label.
    pub fn insertable_choices(&self) -> Vec<InsertChoice> {
        let mut out: Vec<InsertChoice> = self
            .templates
            .iter()
            .filter(|t| !t.fixed && t.insertable)
            .map(|t| InsertChoice { id: t.id.clone(), label: t.label.clone(), disabled_reason: None })
            .collect();
        out.sort_by(|a, b| a.label.cmp(&b.label));
        out
    }
}
