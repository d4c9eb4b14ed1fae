//! Built-in module templates, generated from shell parameters.
//!
//! Every module is a shell of outer walls with window strips, two corridor
//! lanes along the outer walls and a central room. Room-type modules add inner
//! partitions with a door gap on each side. Interior profiles then furnish the
//! room (captain's cabin, battery room, ladder shaft).

use crate::ladder::{
    LadderVariant, LADDER_HIGHEST_ID, LADDER_LOWEST_ID, LADDER_MIDDLE_ID, LADDER_SINGLE_ID,
};
use crate::math::{round_mm, Vec3f};
use crate::template::{
    GeometryBlock, LocalVolume, ModuleSize, ModuleTemplate, ModuleType, Primitive, VolumeKind,
    VolumeSet,
};

pub const COCKPIT_ID: &str = "cockpit_mk1";
pub const CARGO_ID: &str = "cargo_mk1";
pub const CAPTAINS_CABIN_ID: &str = "captains_cabin_mk1";
pub const RADIO_ROOM_ID: &str = "radio_room_mk1";
pub const BATTERY_ROOM_ID: &str = "battery_room_mk1";
pub const EMPTY_ROOM_ID: &str = "empty_room_mk1";

/// Middle modules of level 0 for a fresh layout.
pub const DEFAULT_GROUND_CHAIN: [&str; 2] = [CAPTAINS_CABIN_ID, RADIO_ROOM_ID];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorProfile {
    None,
    CaptainsCabin,
    BatteryRoom,
    Ladder(LadderVariant),
}

#[derive(Debug, Clone)]
pub struct ShellParams {
    pub id: String,
    pub label: String,
    pub module_type: ModuleType,
    pub profile: InteriorProfile,
    pub length_u: f32,
    pub unit_length_m: f32,
    pub height_m: f32,
    pub clear_height_m: f32,
    pub wall_outer_m: f32,
    pub wall_inner_m: f32,
    pub corridor_width_m: f32,
    pub corridor_door_width_m: f32,
    pub room_width_m: f32,
    pub floor_thickness_m: f32,
    pub ceiling_thickness_m: f32,
}

impl ShellParams {
    pub fn new(id: &str, label: &str, module_type: ModuleType, profile: InteriorProfile) -> Self {
        // Modules without inner partitions use the wider room so every
        // module ends up the same overall width.
        let room_width_m = if module_type == ModuleType::Room { 2.4 } else { 2.6 };
        Self {
            id: id.to_string(),
            label: label.to_string(),
            module_type,
            profile,
            length_u: 1.0,
            unit_length_m: 3.2,
            height_m: 2.6,
            clear_height_m: 2.3,
            wall_outer_m: 0.1,
            wall_inner_m: 0.1,
            corridor_width_m: 1.0,
            corridor_door_width_m: 0.9,
            room_width_m,
            floor_thickness_m: 0.08,
            ceiling_thickness_m: 0.08,
        }
    }

    fn has_partitions(&self) -> bool {
        self.module_type == ModuleType::Room
    }

    pub fn length_m(&self) -> f32 {
        self.length_u * self.unit_length_m
    }

    pub fn width_m(&self) -> f32 {
        let inner = if self.has_partitions() { 2.0 * self.wall_inner_m } else { 0.0 };
        2.0 * self.wall_outer_m + 2.0 * self.corridor_width_m + inner + self.room_width_m
    }
}

#[derive(Default)]
struct Shell {
    blocks: Vec<GeometryBlock>,
    volumes: VolumeSet,
}

fn v(x: f32, y: f32, z: f32) -> Vec3f {
    Vec3f::new(round_mm(x), round_mm(y), round_mm(z))
}

impl Shell {
    fn block(&mut self, id: &str, role: &str, center: Vec3f, size: Vec3f) {
        self.blocks.push(GeometryBlock {
            id: id.to_string(),
            role: role.to_string(),
            center: v(center.x, center.y, center.z),
            primitive: Primitive::Box { size: v(size.x, size.y, size.z) },
        });
    }

    fn cylinder(&mut self, id: &str, role: &str, center: Vec3f, radius: f32, height: f32) {
        self.blocks.push(GeometryBlock {
            id: id.to_string(),
            role: role.to_string(),
            center: v(center.x, center.y, center.z),
            primitive: Primitive::Cylinder { radius: round_mm(radius), height: round_mm(height) },
        });
    }

    fn volume(&mut self, kind: VolumeKind, id: &str, center: Vec3f, size: Vec3f) {
        self.volumes.of_mut(kind).push(LocalVolume::new(
            id,
            v(center.x, center.y, center.z),
            v(size.x, size.y, size.z),
        ));
    }

    /// A wall piece that is both rendered and solid.
    fn solid(&mut self, block_id: &str, role: &str, volume_id: &str, center: Vec3f, size: Vec3f) {
        self.block(block_id, role, center, size);
        self.volume(VolumeKind::Blocked, volume_id, center, size);
    }

    fn furniture(&mut self, id: &str, role: &str, center: Vec3f, size: Vec3f) {
        self.solid(id, role, &format!("blocked_{id}"), center, size);
    }
}

/// Generate a module from shell parameters. Metadata flags default from the
/// module type; callers adjust `insertable` and `battery_supply`.
pub fn generate_shell(p: &ShellParams) -> ModuleTemplate {
    let mut s = Shell::default();

    let partitions = p.has_partitions();
    let front_open = p.module_type != ModuleType::Cockpit;
    let rear_open = p.module_type != ModuleType::Cargo;
    let length = p.length_m();
    let width = p.width_m();
    let half_w = width / 2.0;
    let half_l = length / 2.0;
    let h = p.height_m;
    let clear_h = p.clear_height_m;
    let wall = p.wall_outer_m;

    let left_corridor_min = -half_w + wall;
    let left_corridor_max = left_corridor_min + p.corridor_width_m;
    let right_corridor_max = half_w - wall;
    let right_corridor_min = right_corridor_max - p.corridor_width_m;
    let left_corridor_x = (left_corridor_min + left_corridor_max) / 2.0;
    let right_corridor_x = (right_corridor_min + right_corridor_max) / 2.0;

    let (room_min, room_max) = if partitions {
        (left_corridor_max + p.wall_inner_m, right_corridor_min - p.wall_inner_m)
    } else {
        (left_corridor_max, right_corridor_min)
    };
    let bulkhead_x = (room_min + room_max) / 2.0;
    let bulkhead_w = (room_max - room_min).max(0.3);
    let (front_bulkhead_x, front_bulkhead_w) =
        if front_open { (bulkhead_x, bulkhead_w) } else { (0.0, width) };
    let (rear_bulkhead_x, rear_bulkhead_w) =
        if rear_open { (bulkhead_x, bulkhead_w) } else { (0.0, width) };
    let front_wall_z = -(half_l - wall / 2.0);
    let rear_wall_z = half_l - wall / 2.0;

    // Window strips run along both outer walls between sill and top.
    let sill: f32 = 1.0;
    let window_top: f32 = 2.0;
    let window_h = (window_top - sill).max(0.4);
    let window_len = (length - 2.0 * wall - 2.0 * 0.16).max(0.4);
    let pillar_len = ((length - window_len) / 2.0).max(0.12);
    let pillar_z = window_len / 2.0 + pillar_len / 2.0;
    let upper_h = (h - window_top).max(0.2);
    let pane_depth = (wall * 0.35).max(0.02);
    let pane_h = (window_h - 0.06).max(0.3);
    let pane_len = (window_len - 0.08).max(0.3);
    let pane_y = sill + pane_h / 2.0;
    let left_wall_x = -(half_w - wall / 2.0);
    let right_wall_x = half_w - wall / 2.0;
    let left_pane_x = (-half_w + wall) - pane_depth / 2.0;
    let right_pane_x = (half_w - wall) + pane_depth / 2.0;

    let ladder = match p.profile {
        InteriorProfile::Ladder(variant) => Some(variant),
        _ => None,
    };

    if ladder.is_none() {
        s.block("floor", "floor", v(0.0, p.floor_thickness_m / 2.0, 0.0), v(width, p.floor_thickness_m, length));
        s.block(
            "ceiling",
            "ceiling",
            v(0.0, h - p.ceiling_thickness_m / 2.0, 0.0),
            v(width, p.ceiling_thickness_m, length),
        );
    }

    for (side, wall_x) in [("left", left_wall_x), ("right", right_wall_x)] {
        s.solid(
            &format!("wall_outer_{side}_lower"),
            "outer-wall",
            &format!("blocked_outer_{side}_lower"),
            v(wall_x, sill / 2.0, 0.0),
            v(wall, sill, window_len),
        );
        s.solid(
            &format!("wall_outer_{side}_upper"),
            "outer-wall",
            &format!("blocked_outer_{side}_upper"),
            v(wall_x, window_top + upper_h / 2.0, 0.0),
            v(wall, upper_h, window_len),
        );
        s.solid(
            &format!("wall_outer_{side}_front_pillar"),
            "outer-wall",
            &format!("blocked_outer_{side}_front_pillar"),
            v(wall_x, h / 2.0, -pillar_z),
            v(wall, h, pillar_len),
        );
        s.solid(
            &format!("wall_outer_{side}_rear_pillar"),
            "outer-wall",
            &format!("blocked_outer_{side}_rear_pillar"),
            v(wall_x, h / 2.0, pillar_z),
            v(wall, h, pillar_len),
        );
    }
    for (side, pane_x) in [("left", left_pane_x), ("right", right_pane_x)] {
        s.solid(
            &format!("window_strip_{side}"),
            "corridor-window-strip",
            &format!("blocked_window_strip_{side}"),
            v(pane_x, pane_y, 0.0),
            v(pane_depth, pane_h, pane_len),
        );
    }

    s.solid(
        "wall_rear",
        "bulkhead-rear",
        "blocked_rear",
        v(rear_bulkhead_x, h / 2.0, rear_wall_z),
        v(rear_bulkhead_w, h, wall),
    );

    let light_x = if ladder.is_some() { room_max - 0.28 } else { 0.0 };
    s.cylinder(
        "ceiling_light_center",
        "ceiling-light",
        v(light_x, h - p.ceiling_thickness_m - 0.05 - 0.03, 0.0),
        0.24,
        0.1,
    );

    if p.module_type == ModuleType::Cockpit {
        let window_w = (width - 0.5).min(1.6).max(0.9);
        let pillar_w = ((width - window_w) / 2.0).max(0.12);
        let pillar_x = window_w / 2.0 + pillar_w / 2.0;
        let front_pane_w = (window_w - 0.08).max(0.7);
        let front_pane_z = front_wall_z - wall / 2.0 + pane_depth / 2.0;
        s.solid(
            "wall_front_lower",
            "bulkhead-front",
            "blocked_front_lower",
            v(0.0, sill / 2.0, front_wall_z),
            v(window_w, sill, wall),
        );
        s.solid(
            "wall_front_upper",
            "bulkhead-front",
            "blocked_front_upper",
            v(0.0, window_top + upper_h / 2.0, front_wall_z),
            v(window_w, upper_h, wall),
        );
        s.solid(
            "wall_front_left_pillar",
            "bulkhead-front",
            "blocked_front_left_pillar",
            v(-pillar_x, h / 2.0, front_wall_z),
            v(pillar_w, h, wall),
        );
        s.solid(
            "wall_front_right_pillar",
            "bulkhead-front",
            "blocked_front_right_pillar",
            v(pillar_x, h / 2.0, front_wall_z),
            v(pillar_w, h, wall),
        );
        s.solid(
            "window_front",
            "front-window-strip",
            "blocked_front_window_pane",
            v(0.0, pane_y, front_pane_z),
            v(front_pane_w, pane_h, pane_depth),
        );
    } else {
        s.solid(
            "wall_front",
            "bulkhead-front",
            "blocked_front",
            v(front_bulkhead_x, h / 2.0, front_wall_z),
            v(front_bulkhead_w, h, wall),
        );
    }

    if partitions {
        let gap = p.corridor_door_width_m;
        let gap_volume = (length - 0.2).min(gap + 0.16);
        let segment = (length - gap) / 2.0;
        let segment_z = gap / 2.0 + segment / 2.0;
        let lintel_bottom = (clear_h - 0.2).max(1.9);
        let lintel_h = h - lintel_bottom;
        let inner_left_x = left_corridor_max + p.wall_inner_m / 2.0;
        let inner_right_x = right_corridor_min - p.wall_inner_m / 2.0;
        for (side, x) in [("left", inner_left_x), ("right", inner_right_x)] {
            s.solid(
                &format!("wall_inner_{side}_front"),
                "inner-wall",
                &format!("blocked_inner_{side}_front"),
                v(x, h / 2.0, -segment_z),
                v(p.wall_inner_m, h, segment),
            );
            s.solid(
                &format!("wall_inner_{side}_rear"),
                "inner-wall",
                &format!("blocked_inner_{side}_rear"),
                v(x, h / 2.0, segment_z),
                v(p.wall_inner_m, h, segment),
            );
            s.solid(
                &format!("wall_inner_{side}_lintel"),
                "inner-wall-lintel",
                &format!("blocked_inner_{side}_lintel"),
                v(x, lintel_bottom + lintel_h / 2.0, 0.0),
                v(p.wall_inner_m, lintel_h, gap),
            );
            s.volume(
                VolumeKind::Doorway,
                &format!("doorway_room_{side}"),
                v(x, clear_h / 2.0, 0.0),
                v(p.wall_inner_m + 0.01, clear_h, gap_volume),
            );
        }
    }

    let walk_len = length - 2.0 * wall;
    s.volume(
        VolumeKind::Walkable,
        "walk_corridor_left",
        v(left_corridor_x, clear_h / 2.0, 0.0),
        v(p.corridor_width_m, clear_h, walk_len),
    );
    s.volume(
        VolumeKind::Walkable,
        "walk_corridor_right",
        v(right_corridor_x, clear_h / 2.0, 0.0),
        v(p.corridor_width_m, clear_h, walk_len),
    );
    s.volume(
        VolumeKind::Walkable,
        "walk_room",
        v((room_min + room_max) / 2.0, clear_h / 2.0, 0.0),
        v((room_max - room_min).max(0.2), clear_h, walk_len),
    );

    let mut end_doors = Vec::new();
    if front_open {
        end_doors.push(("front", front_wall_z));
    }
    if rear_open {
        end_doors.push(("rear", rear_wall_z));
    }
    for (end, z) in end_doors {
        for (side, x) in [("left", left_corridor_x), ("right", right_corridor_x)] {
            s.volume(
                VolumeKind::Doorway,
                &format!("doorway_{end}_{side}"),
                v(x, clear_h / 2.0, z),
                v(p.corridor_width_m, clear_h, wall + 0.01),
            );
        }
    }

    s.volume(
        VolumeKind::HeadBump,
        "headbump_ceiling",
        v(0.0, clear_h + (h - clear_h) / 2.0, 0.0),
        v(width - 2.0 * wall, h - clear_h, walk_len),
    );

    match p.profile {
        InteriorProfile::None => {}
        InteriorProfile::CaptainsCabin => furnish_captains_cabin(&mut s, p, room_min, room_max),
        InteriorProfile::BatteryRoom => furnish_battery_room(&mut s, p),
        InteriorProfile::Ladder(variant) => furnish_ladder_shaft(&mut s, p, variant),
    }

    let fixed = p.module_type.is_end_cap();
    ModuleTemplate {
        id: p.id.clone(),
        label: p.label.clone(),
        module_type: p.module_type,
        size: ModuleSize {
            length_m: round_mm(length),
            width_m: round_mm(width),
            height_m: round_mm(h),
        },
        blocks: s.blocks,
        volumes: s.volumes,
        fixed,
        insertable: !fixed,
        battery_supply: false,
        ladder,
    }
}

fn furnish_captains_cabin(s: &mut Shell, p: &ShellParams, room_min: f32, room_max: f32) {
    let half_l = p.length_m() / 2.0;
    let room_front_z = -(half_l - p.wall_outer_m);
    let room_rear_z = half_l - p.wall_outer_m;
    let floor_y = p.floor_thickness_m;

    s.furniture("furn_bed_frame", "furniture-bed-frame", v(0.0, floor_y + 0.2, room_rear_z - 0.51), v(2.02, 0.4, 1.02));
    s.furniture(
        "furn_bed_mattress",
        "furniture-bed-mattress",
        v(0.0, floor_y + 0.49, room_rear_z - 0.51),
        v(1.94, 0.18, 0.96),
    );

    let desk_w: f32 = 1.1;
    let side_gap: f32 = 0.06;
    let unit_outer_right = room_max - side_gap;
    let unit_inner_right = desk_w / 2.0 + side_gap;
    let unit_w = unit_outer_right - unit_inner_right;
    let unit_right_x = (unit_outer_right + unit_inner_right) / 2.0;
    let unit_left_x = ((room_min + side_gap) + -(desk_w / 2.0 + side_gap)) / 2.0;
    let front_z = room_front_z + 0.26;

    s.furniture("furn_locker", "furniture-locker", v(unit_right_x, floor_y + 0.95, front_z), v(unit_w, 1.9, 0.5));

    // Bookshelf: two sides, a back board, five shelves and four rows of books.
    let shelf_h: f32 = 1.9;
    let shelf_y = floor_y + 0.95;
    let shelf_depth: f32 = 0.42;
    let board: f32 = 0.03;
    let inner_w = (unit_w - 2.0 * board).max(0.2);
    let inner_depth = (shelf_depth - board).max(0.12);
    s.furniture(
        "furn_bookshelf_side_left",
        "furniture-bookshelf-side",
        v(unit_left_x - unit_w / 2.0 + board / 2.0, shelf_y, front_z),
        v(board, shelf_h, shelf_depth),
    );
    s.furniture(
        "furn_bookshelf_side_right",
        "furniture-bookshelf-side",
        v(unit_left_x + unit_w / 2.0 - board / 2.0, shelf_y, front_z),
        v(board, shelf_h, shelf_depth),
    );
    s.furniture(
        "furn_bookshelf_rear",
        "furniture-bookshelf-rear",
        v(unit_left_x, shelf_y, front_z - shelf_depth / 2.0 + board / 2.0),
        v(inner_w, shelf_h, board),
    );

    let shelf_count = 5;
    let first = floor_y + board / 2.0;
    let last = floor_y + shelf_h - board / 2.0;
    let shelves: Vec<f32> = (0..shelf_count)
        .map(|i| first + (last - first) * i as f32 / (shelf_count - 1) as f32)
        .collect();
    for (i, y) in shelves.iter().enumerate() {
        s.furniture(
            &format!("furn_bookshelf_shelf_{}", i + 1),
            "furniture-bookshelf-shelf",
            v(unit_left_x, *y, front_z + board / 2.0),
            v(inner_w, board, inner_depth),
        );
    }

    let per_row = 6;
    let usable_w = (inner_w - 0.04).max(0.2);
    let slot_w = usable_w / per_row as f32;
    let book_w = (slot_w * 0.78).min(0.065).max(0.03);
    let book_depth = (inner_depth - 0.1).max(0.18);
    let mut book = 0;
    for pair in shelves.windows(2) {
        let bottom = pair[0] + board / 2.0;
        let top = pair[1] - board / 2.0;
        let book_h = (top - bottom - 0.02).max(0.16);
        for col in 0..per_row {
            book += 1;
            let x = unit_left_x - usable_w / 2.0 + slot_w * (col as f32 + 0.5);
            s.furniture(
                &format!("furn_books_leather_{book}"),
                "furniture-books-leather",
                v(x, bottom + book_h / 2.0, front_z + 0.02),
                v(book_w, book_h, book_depth),
            );
        }
    }

    s.furniture("furn_desk", "furniture-desk", v(0.0, floor_y + 0.38, room_front_z + 0.36), v(desk_w, 0.76, 0.56));

    let seat_z = room_front_z + 0.86;
    let seat: f32 = 0.44;
    let back_depth: f32 = 0.08;
    s.furniture("furn_chair_seat", "furniture-chair-seat", v(0.0, floor_y + seat / 2.0, seat_z), v(seat, seat, seat));
    s.furniture(
        "furn_chair_back",
        "furniture-chair-back",
        v(0.0, floor_y + seat + 0.22, seat_z + seat / 2.0 - back_depth / 2.0),
        v(seat, 0.44, back_depth),
    );
    // Paper on the desk is decoration only.
    s.block("furn_a4_paper", "furniture-paper-a4", v(0.18, floor_y + 0.77, room_front_z + 0.33), v(0.21, 0.01, 0.297));
}

fn furnish_battery_room(s: &mut Shell, p: &ShellParams) {
    let half_l = p.length_m() / 2.0;
    let room_front_z = -(half_l - p.wall_outer_m);
    let room_rear_z = half_l - p.wall_outer_m;
    let floor_y = p.floor_thickness_m;
    let depth: f32 = 0.72;
    let box_w: f32 = 0.86;
    let box_h: f32 = 1.15;
    let z = room_front_z + depth / 2.0 + 0.12;

    s.furniture("furn_battery_box_a", "furniture-battery-box-a", v(-0.58, floor_y + box_h / 2.0, z), v(box_w, box_h, depth));
    s.furniture("furn_battery_box_b", "furniture-battery-box-b", v(0.58, floor_y + box_h / 2.0, z), v(box_w, box_h, depth));
    s.block(
        "furn_battery_control_panel",
        "furniture-battery-control-panel",
        v(0.0, 1.45, room_rear_z - 0.12),
        v(0.92, 0.92, 0.18),
    );
}

fn horizontal_panel(s: &mut Shell, p: &ShellParams, prefix: &str, y: f32, thickness: f32, shaft: f32, hole: bool) {
    let width = p.width_m();
    let length = p.length_m();
    if !hole {
        s.block(prefix, prefix, v(0.0, y, 0.0), v(width, thickness, length));
        return;
    }
    let side_w = ((width - shaft) / 2.0).max(0.12);
    let end_l = ((length - shaft) / 2.0).max(0.12);
    let side_x = shaft / 2.0 + side_w / 2.0;
    let end_z = shaft / 2.0 + end_l / 2.0;
    s.block(&format!("{prefix}_left"), prefix, v(-side_x, y, 0.0), v(side_w, thickness, length));
    s.block(&format!("{prefix}_right"), prefix, v(side_x, y, 0.0), v(side_w, thickness, length));
    s.block(&format!("{prefix}_front"), prefix, v(0.0, y, -end_z), v(shaft, thickness, end_l));
    s.block(&format!("{prefix}_rear"), prefix, v(0.0, y, end_z), v(shaft, thickness, end_l));
}

fn furnish_ladder_shaft(s: &mut Shell, p: &ShellParams, variant: LadderVariant) {
    let shaft: f32 = 0.78;
    let rail_offset: f32 = 0.14;
    let rail_overlap: f32 = 0.24;
    let climb_overlap: f32 = 0.44;
    let floor_hole = variant.floor_hole();
    let ceiling_hole = variant.ceiling_hole();
    let floor_top = p.floor_thickness_m;
    let ceiling_bottom = p.height_m - p.ceiling_thickness_m;

    horizontal_panel(s, p, "floor", p.floor_thickness_m / 2.0, p.floor_thickness_m, shaft, floor_hole);
    horizontal_panel(
        s,
        p,
        "ceiling",
        p.height_m - p.ceiling_thickness_m / 2.0,
        p.ceiling_thickness_m,
        shaft,
        ceiling_hole,
    );

    let rail_bottom = if floor_hole { -rail_overlap } else { floor_top };
    let rail_top = if ceiling_hole { p.height_m + rail_overlap } else { ceiling_bottom - 0.06 };
    let rail_h = (rail_top - rail_bottom).max(1.7);
    let rail_y = rail_bottom + rail_h / 2.0;
    s.cylinder("furn_ladder_rail_left", "furniture-ladder-rail", v(-rail_offset, rail_y, 0.0), 0.02, rail_h);
    s.cylinder("furn_ladder_rail_right", "furniture-ladder-rail", v(rail_offset, rail_y, 0.0), 0.02, rail_h);
    let rungs = 10;
    for i in 0..rungs {
        let y = rail_bottom + 0.16 + (rail_h - 0.28) * (i as f32 / (rungs - 1) as f32);
        s.block(&format!("furn_ladder_rung_{}", i + 1), "furniture-ladder-rung", v(0.0, y, 0.0), v(0.36, 0.03, 0.06));
    }

    let climb_bottom = if floor_hole { -climb_overlap } else { 0.0 };
    let climb_top = if ceiling_hole { p.height_m + climb_overlap } else { p.clear_height_m };
    let climb_h = (climb_top - climb_bottom).max(1.7);
    s.volume(
        VolumeKind::Climb,
        "climb_ladder_column",
        v(0.0, climb_bottom + climb_h / 2.0, 0.0),
        v(shaft, climb_h, shaft),
    );
}

fn ladder_room(variant: LadderVariant) -> ModuleTemplate {
    let (id, label) = match variant {
        LadderVariant::Single => (LADDER_SINGLE_ID, "Ladder Room"),
        LadderVariant::Lowest => (LADDER_LOWEST_ID, "Ladder Room (Lowest)"),
        LadderVariant::Middle => (LADDER_MIDDLE_ID, "Ladder Room (Middle)"),
        LadderVariant::Highest => (LADDER_HIGHEST_ID, "Ladder Room (Highest)"),
    };
    let mut t = generate_shell(&ShellParams::new(id, label, ModuleType::Room, InteriorProfile::Ladder(variant)));
    t.insertable = variant == LadderVariant::Single;
    t
}

/// The ten templates every world starts with.
pub fn standard_templates() -> Vec<ModuleTemplate> {
    let mut battery = generate_shell(&ShellParams::new(
        BATTERY_ROOM_ID,
        "Battery Room",
        ModuleType::Room,
        InteriorProfile::BatteryRoom,
    ));
    battery.battery_supply = true;

    vec![
        generate_shell(&ShellParams::new(COCKPIT_ID, "Cockpit", ModuleType::Cockpit, InteriorProfile::None)),
        generate_shell(&ShellParams::new(
            CAPTAINS_CABIN_ID,
            "Captain's Cabin",
            ModuleType::Room,
            InteriorProfile::CaptainsCabin,
        )),
        generate_shell(&ShellParams::new(RADIO_ROOM_ID, "Radio Room", ModuleType::Room, InteriorProfile::None)),
        battery,
        ladder_room(LadderVariant::Single),
        ladder_room(LadderVariant::Lowest),
        ladder_room(LadderVariant::Middle),
        ladder_room(LadderVariant::Highest),
        generate_shell(&ShellParams::new(EMPTY_ROOM_ID, "Empty Room", ModuleType::Open, InteriorProfile::None)),
        generate_shell(&ShellParams::new(CARGO_ID, "Cargo", ModuleType::Cargo, InteriorProfile::None)),
    ]
}
