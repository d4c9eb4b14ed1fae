//! Module blueprints: geometry blocks (passed through to rendering) and the
//! semantic volumes the occupancy engine works with.

use serde::{Deserialize, Serialize};

use crate::error::{HullError, HullResult};
use crate::ladder::LadderVariant;
use crate::math::{BoxShape, Vec3f};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Room,
    Open,
    Cockpit,
    Cargo,
}

impl ModuleType {
    /// Cockpit and cargo are the permanent end-caps of every chain.
    pub fn is_end_cap(self) -> bool {
        matches!(self, ModuleType::Cockpit | ModuleType::Cargo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeKind {
    Walkable,
    Blocked,
    Doorway,
    Climb,
    HeadBump,
}

impl VolumeKind {
    pub const ALL: [VolumeKind; 5] = [
        VolumeKind::Walkable,
        VolumeKind::Blocked,
        VolumeKind::Doorway,
        VolumeKind::Climb,
        VolumeKind::HeadBump,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalVolume {
    pub id: String,
    pub shape: BoxShape,
}

impl LocalVolume {
    pub fn new(id: impl Into<String>, center: Vec3f, size: Vec3f) -> Self {
        Self { id: id.into(), shape: BoxShape::new(center, size) }
    }
}

/// The five volume collections of a module, in module-local space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeSet {
    pub walkable: Vec<LocalVolume>,
    pub blocked: Vec<LocalVolume>,
    pub doorway: Vec<LocalVolume>,
    pub climb: Vec<LocalVolume>,
    pub head_bump: Vec<LocalVolume>,
}

impl VolumeSet {
    pub fn of(&self, kind: VolumeKind) -> &[LocalVolume] {
        match kind {
            VolumeKind::Walkable => &self.walkable,
            VolumeKind::Blocked => &self.blocked,
            VolumeKind::Doorway => &self.doorway,
            VolumeKind::Climb => &self.climb,
            VolumeKind::HeadBump => &self.head_bump,
        }
    }

    pub fn of_mut(&mut self, kind: VolumeKind) -> &mut Vec<LocalVolume> {
        match kind {
            VolumeKind::Walkable => &mut self.walkable,
            VolumeKind::Blocked => &mut self.blocked,
            VolumeKind::Doorway => &mut self.doorway,
            VolumeKind::Climb => &mut self.climb,
            VolumeKind::HeadBump => &mut self.head_bump,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VolumeKind, &LocalVolume)> + '_ {
        VolumeKind::ALL
            .into_iter()
            .flat_map(move |kind| self.of(kind).iter().map(move |v| (kind, v)))
    }

    pub fn len(&self) -> usize {
        VolumeKind::ALL.iter().map(|k| self.of(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleSize {
    pub length_m: f32,
    pub width_m: f32,
    pub height_m: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Box { size: Vec3f },
    Cylinder { radius: f32, height: f32 },
}

/// A renderable piece of a module. `role` is a free-text rendering hint and
/// never drives control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryBlock {
    pub id: String,
    pub role: String,
    pub center: Vec3f,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTemplate {
    pub id: String,
    pub label: String,
    pub module_type: ModuleType,
    pub size: ModuleSize,
    pub blocks: Vec<GeometryBlock>,
    pub volumes: VolumeSet,
    /// Fixed templates are end-caps: never inserted, never removed.
    pub fixed: bool,
    pub insertable: bool,
    pub battery_supply: bool,
    /// Set on the four ladder-room variants.
    pub ladder: Option<LadderVariant>,
}

impl ModuleTemplate {
    pub fn is_ladder(&self) -> bool {
        self.ladder.is_some()
    }

    /// Rejects any volume with non-finite components or a non-positive size.
    pub fn validate(&self) -> HullResult<()> {
        let size = Vec3f::new(self.size.width_m, self.size.height_m, self.size.length_m);
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(HullError::DegenerateGeometry {
                template: self.id.clone(),
                volume: "size".into(),
                reason: format!("module size {size:?} must be finite and positive"),
            });
        }
        for (kind, vol) in self.volumes.iter() {
            if !vol.shape.is_finite() {
                return Err(HullError::DegenerateGeometry {
                    template: self.id.clone(),
                    volume: vol.id.clone(),
                    reason: format!("{kind:?} box has non-finite components"),
                });
            }
            if vol.shape.size.min_element() <= 0.0 {
                return Err(HullError::DegenerateGeometry {
                    template: self.id.clone(),
                    volume: vol.id.clone(),
                    reason: format!("{kind:?} box size {:?} is not positive", vol.shape.size),
                });
            }
        }
        Ok(())
    }
}

// JSON module documents ------------------------------------------------------

/// On-disk module document. Unknown fields (materials, anchors, texture
/// bindings) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDoc {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub module_type: ModuleType,
    pub size: SizeDoc,
    #[serde(default)]
    pub geometry: GeometryDoc,
    pub volumes: VolumeSetDoc,
    #[serde(default)]
    pub fixed: Option<bool>,
    #[serde(default)]
    pub insertable: Option<bool>,
    #[serde(default)]
    pub provides_battery_supply: bool,
    #[serde(default)]
    pub ladder_variant: Option<LadderVariant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeDoc {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryDoc {
    #[serde(default)]
    pub blocks: Vec<BlockDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "primitive", rename_all = "lowercase")]
pub enum BlockDoc {
    Box {
        id: String,
        #[serde(default)]
        role: String,
        center: Vec<f64>,
        size: Vec<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Cylinder {
        id: String,
        #[serde(default)]
        role: String,
        center: Vec<f64>,
        radius_top: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSetDoc {
    #[serde(default)]
    pub walkable: Vec<VolumeDoc>,
    #[serde(default)]
    pub blocked: Vec<VolumeDoc>,
    #[serde(default)]
    pub doorway: Vec<VolumeDoc>,
    #[serde(default)]
    pub climb: Vec<VolumeDoc>,
    #[serde(default)]
    pub head_bump: Vec<VolumeDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeDoc {
    pub id: String,
    pub center: Vec<f64>,
    pub size: Vec<f64>,
}

fn vec3_from(components: &[f64], template: &str, part: &str) -> HullResult<Vec3f> {
    match components {
        [x, y, z] => {
            let v = Vec3f::new(*x as f32, *y as f32, *z as f32);
            if v.is_finite() {
                Ok(v)
            } else {
                Err(HullError::DegenerateGeometry {
                    template: template.to_string(),
                    volume: part.to_string(),
                    reason: "non-finite component".into(),
                })
            }
        }
        _ => Err(HullError::DegenerateGeometry {
            template: template.to_string(),
            volume: part.to_string(),
            reason: format!("expected 3 components, found {}", components.len()),
        }),
    }
}

impl ModuleDoc {
    pub fn into_template(self) -> HullResult<ModuleTemplate> {
        let id = self.id;
        let mut volumes = VolumeSet::default();
        let docs = [
            (VolumeKind::Walkable, self.volumes.walkable),
            (VolumeKind::Blocked, self.volumes.blocked),
            (VolumeKind::Doorway, self.volumes.doorway),
            (VolumeKind::Climb, self.volumes.climb),
            (VolumeKind::HeadBump, self.volumes.head_bump),
        ];
        for (kind, list) in docs {
            for doc in list {
                let center = vec3_from(&doc.center, &id, &doc.id)?;
                let size = vec3_from(&doc.size, &id, &doc.id)?;
                volumes.of_mut(kind).push(LocalVolume { id: doc.id, shape: BoxShape::new(center, size) });
            }
        }

        let mut blocks = Vec::with_capacity(self.geometry.blocks.len());
        for block in self.geometry.blocks {
            blocks.push(match block {
                BlockDoc::Box { id: bid, role, center, size } => GeometryBlock {
                    center: vec3_from(&center, &id, &bid)?,
                    primitive: Primitive::Box { size: vec3_from(&size, &id, &bid)? },
                    id: bid,
                    role,
                },
                BlockDoc::Cylinder { id: bid, role, center, radius_top, height } => GeometryBlock {
                    center: vec3_from(&center, &id, &bid)?,
                    primitive: Primitive::Cylinder { radius: radius_top as f32, height: height as f32 },
                    id: bid,
                    role,
                },
            });
        }

        let fixed = self.fixed.unwrap_or(self.module_type.is_end_cap());
        let template = ModuleTemplate {
            label: self.label.unwrap_or_else(|| id.clone()),
            module_type: self.module_type,
            size: ModuleSize {
                length_m: self.size.length_m as f32,
                width_m: self.size.width_m as f32,
                height_m: self.size.height_m as f32,
            },
            blocks,
            volumes,
            fixed,
            insertable: self.insertable.unwrap_or(!fixed),
            battery_supply: self.provides_battery_supply,
            ladder: self.ladder_variant,
            id,
        };
        template.validate()?;
        Ok(template)
    }
}
