#![forbid(unsafe_code)]

//! The [`FlexGridLayout`] container: entity registry, grouping indices and
//! container configuration. The layout pass itself lives in `solve.rs`.

use flexgrid_core::{Bounds, Insets, LayoutConstraints, LayoutSize, trace};
use rustc_hash::FxHashMap;

use crate::config::{FillAxes, GridConfig};
use crate::constraint::{Alignment, EntityConstraints, FlowDirection, HideMode};
use crate::entity::{EntityHandle, WeakEntity};

/// Stable identifier of an entity inside one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(u32);

impl EntityKey {
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One entity as seen by a layout: a weak reference, its constraints and the
/// results of the last pass.
#[derive(Clone)]
pub struct EntityInfo {
    key: EntityKey,
    entity: WeakEntity,
    pub(crate) constraints: EntityConstraints,
    pub(crate) participates: bool,
    pub(crate) calculated_size: LayoutSize,
    pub(crate) bounds: Bounds,
    pub(crate) placed: bool,
    pub(crate) grid_x: Option<usize>,
    pub(crate) grid_y: Option<usize>,
    pub(crate) span_x: usize,
    pub(crate) span_y: usize,
}

impl std::fmt::Debug for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityInfo")
            .field("key", &self.key)
            .field("alive", &self.entity.is_alive())
            .field("participates", &self.participates)
            .field("calculated_size", &self.calculated_size)
            .field("bounds", &self.bounds)
            .field("grid", &self.grid_position())
            .field("span", &(self.span_x, self.span_y))
            .finish()
    }
}

impl EntityInfo {
    fn new(key: EntityKey, entity: WeakEntity, constraints: EntityConstraints) -> Self {
        Self {
            key,
            entity,
            constraints,
            participates: true,
            calculated_size: LayoutSize::ZERO,
            bounds: Bounds::default(),
            placed: false,
            grid_x: None,
            grid_y: None,
            span_x: 1,
            span_y: 1,
        }
    }

    pub(crate) fn reset_transient(&mut self) {
        self.calculated_size = LayoutSize::ZERO;
        self.bounds = Bounds::default();
        self.placed = false;
        self.grid_x = None;
        self.grid_y = None;
        self.span_x = 1;
        self.span_y = 1;
    }

    pub fn key(&self) -> EntityKey {
        self.key
    }

    /// The host entity, if it is still alive.
    pub fn entity(&self) -> Option<EntityHandle> {
        self.entity.upgrade()
    }

    pub(crate) fn weak(&self) -> &WeakEntity {
        &self.entity
    }

    pub fn constraints(&self) -> &EntityConstraints {
        &self.constraints
    }

    /// Whether the last pass laid this entity out.
    pub fn participates(&self) -> bool {
        self.participates
    }

    pub fn calculated_size(&self) -> LayoutSize {
        self.calculated_size
    }

    /// Geometry assigned by the last pass.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    /// `(column, row)` of the top-left cell, for gridded entities.
    pub fn grid_position(&self) -> Option<(usize, usize)> {
        self.grid_x.zip(self.grid_y)
    }

    /// Effective `(columns, rows)` covered after span-to-end resolution.
    pub fn spans(&self) -> (usize, usize) {
        (self.span_x, self.span_y)
    }
}

/// Which grouping index a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Size,
    End,
}

/// A MigLayout-style grid/flow container.
///
/// Entities are added with [`add_entity`](Self::add_entity) and laid out by
/// [`perform_layout`](Self::perform_layout). The layout keeps weak references
/// only; entities dropped by the host disappear on the next pass.
#[derive(Debug, Clone, Default)]
pub struct FlexGridLayout {
    pub(crate) config: GridConfig,
    pub(crate) entities: Vec<EntityInfo>,
    next_key: u32,

    id_index: FxHashMap<String, EntityKey>,
    pub(crate) size_groups: FxHashMap<String, Vec<EntityKey>>,
    pub(crate) end_groups: FxHashMap<String, Vec<EntityKey>>,

    pub(crate) grid_width: usize,
    pub(crate) grid_height: usize,
    pub(crate) column_widths: Vec<f32>,
    pub(crate) row_heights: Vec<f32>,
    pub(crate) column_grow_weights: Vec<f32>,
    pub(crate) row_grow_weights: Vec<f32>,
    pub(crate) last_available_space: LayoutConstraints,
}

impl FlexGridLayout {
    /// Empty layout with [`GridConfig::DEFAULT`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty layout with the given configuration.
    #[must_use]
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // --- Container configuration ---

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn set_gap(&mut self, horizontal: f32, vertical: f32) -> &mut Self {
        self.config.horizontal_gap = horizontal;
        self.config.vertical_gap = vertical;
        self
    }

    /// `None` disables wrapping.
    pub fn set_wrap(&mut self, columns: Option<usize>) -> &mut Self {
        self.config.wrap = columns.filter(|&n| n > 0);
        self
    }

    pub fn set_fill(&mut self, horizontal: bool, vertical: bool) -> &mut Self {
        self.config.fill.set(FillAxes::HORIZONTAL, horizontal);
        self.config.fill.set(FillAxes::VERTICAL, vertical);
        self
    }

    pub fn set_insets(&mut self, insets: impl Into<Insets>) -> &mut Self {
        self.config.insets = insets.into();
        self
    }

    pub fn set_flow_direction(&mut self, flow: FlowDirection) -> &mut Self {
        self.config.flow_direction = flow;
        self
    }

    pub fn set_no_grid(&mut self, no_grid: bool) -> &mut Self {
        self.config.no_grid = no_grid;
        self
    }

    pub fn set_alignment(&mut self, horizontal: Alignment, vertical: Alignment) -> &mut Self {
        self.config.horizontal_align = horizontal;
        self.config.vertical_align = vertical;
        self
    }

    pub fn set_hide_mode(&mut self, mode: HideMode) -> &mut Self {
        self.config.hide_mode = mode;
        self
    }

    pub fn set_debug_mode(&mut self, debug: bool) -> &mut Self {
        self.config.debug = debug;
        self
    }

    // --- Entity registry ---

    /// Add an entity, or replace its constraints if it is already present.
    pub fn add_entity(
        &mut self,
        entity: &EntityHandle,
        constraints: impl Into<Option<EntityConstraints>>,
    ) -> &mut Self {
        let constraints = constraints.into().unwrap_or_default();
        match self.position_of(entity) {
            Some(idx) => {
                self.unindex(idx);
                self.entities[idx].constraints = constraints;
                self.reindex(idx);
            }
            None => {
                let key = EntityKey(self.next_key);
                self.next_key = self.next_key.wrapping_add(1);
                self.entities
                    .push(EntityInfo::new(key, entity.downgrade(), constraints));
                self.reindex(self.entities.len() - 1);
            }
        }
        self
    }

    /// Remove an entity and every index entry pointing at it.
    pub fn remove_entity(&mut self, entity: &EntityHandle) -> bool {
        let Some(idx) = self.position_of(entity) else {
            return false;
        };
        self.unindex(idx);
        self.entities.remove(idx);
        true
    }

    /// Replace an entity's constraints and re-derive its index entries.
    ///
    /// Returns `false` if the entity is not part of this layout.
    pub fn set_entity_constraints(
        &mut self,
        entity: &EntityHandle,
        constraints: EntityConstraints,
    ) -> bool {
        let Some(idx) = self.position_of(entity) else {
            return false;
        };
        self.unindex(idx);
        self.entities[idx].constraints = constraints;
        self.reindex(idx);
        true
    }

    pub fn entity_constraints(&self, entity: &EntityHandle) -> Option<&EntityConstraints> {
        self.position_of(entity)
            .map(|idx| &self.entities[idx].constraints)
    }

    /// Key of an entity in this layout.
    pub fn key_of(&self, entity: &EntityHandle) -> Option<EntityKey> {
        self.position_of(entity).map(|idx| self.entities[idx].key)
    }

    pub fn contains(&self, entity: &EntityHandle) -> bool {
        self.position_of(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity and index entry.
    pub fn clear_entities(&mut self) {
        self.entities.clear();
        self.id_index.clear();
        self.size_groups.clear();
        self.end_groups.clear();
    }

    // --- Identity ---

    /// Assign a component id. An empty id clears the entity's id.
    ///
    /// Ids are unique: claiming an id held by another entity takes it away.
    pub fn set_entity_id(&mut self, entity: &EntityHandle, id: impl Into<String>) -> bool {
        let Some(idx) = self.position_of(entity) else {
            return false;
        };
        let id = id.into();
        let key = self.entities[idx].key;
        if let Some(old) = self.entities[idx].constraints.component_id()
            && self.id_index.get(old) == Some(&key)
        {
            let old = old.to_owned();
            self.id_index.remove(&old);
        }
        self.entities[idx].constraints.set_component_id(id.clone());
        if !id.is_empty() {
            self.claim_id(key, id);
        }
        true
    }

    pub fn get_entity_by_id(&self, id: &str) -> Option<EntityHandle> {
        let key = self.id_index.get(id)?;
        self.info(*key)?.entity()
    }

    // --- Groups ---

    /// Put an entity into a size group, leaving any previous size group.
    pub fn add_to_size_group(&mut self, entity: &EntityHandle, group: &str) -> bool {
        self.join_group(entity, group, GroupKind::Size)
    }

    pub fn remove_from_size_group(&mut self, entity: &EntityHandle, group: &str) -> bool {
        self.leave_group(entity, group, GroupKind::Size)
    }

    /// Put an entity into an end group, leaving any previous end group.
    pub fn add_to_end_group(&mut self, entity: &EntityHandle, group: &str) -> bool {
        self.join_group(entity, group, GroupKind::End)
    }

    pub fn remove_from_end_group(&mut self, entity: &EntityHandle, group: &str) -> bool {
        self.leave_group(entity, group, GroupKind::End)
    }

    /// Live members of a size group, in join order.
    pub fn size_group_members(&self, group: &str) -> Vec<EntityHandle> {
        self.members(self.size_groups.get(group))
    }

    /// Live members of an end group, in join order.
    pub fn end_group_members(&self, group: &str) -> Vec<EntityHandle> {
        self.members(self.end_groups.get(group))
    }

    // --- Results ---

    /// Per-entity view in insertion order.
    pub fn entities(&self) -> &[EntityInfo] {
        &self.entities
    }

    /// Live entity handles in insertion order.
    pub fn entity_list(&self) -> Vec<EntityHandle> {
        self.entities.iter().filter_map(EntityInfo::entity).collect()
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[f32] {
        &self.row_heights
    }

    pub fn column_grow_weights(&self) -> &[f32] {
        &self.column_grow_weights
    }

    pub fn row_grow_weights(&self) -> &[f32] {
        &self.row_grow_weights
    }

    /// `(columns, rows)` of the last pass.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    pub fn last_available_space(&self) -> LayoutConstraints {
        self.last_available_space
    }

    // --- Internals ---

    fn position_of(&self, entity: &EntityHandle) -> Option<usize> {
        self.entities.iter().position(|i| i.weak().points_to(entity))
    }

    pub(crate) fn info(&self, key: EntityKey) -> Option<&EntityInfo> {
        self.entities.iter().find(|i| i.key == key)
    }

    fn members(&self, keys: Option<&Vec<EntityKey>>) -> Vec<EntityHandle> {
        keys.into_iter()
            .flatten()
            .filter_map(|key| self.info(*key)?.entity())
            .collect()
    }

    fn groups_mut(&mut self, kind: GroupKind) -> &mut FxHashMap<String, Vec<EntityKey>> {
        match kind {
            GroupKind::Size => &mut self.size_groups,
            GroupKind::End => &mut self.end_groups,
        }
    }

    fn group_field(constraints: &EntityConstraints, kind: GroupKind) -> Option<&str> {
        match kind {
            GroupKind::Size => constraints.size_group(),
            GroupKind::End => constraints.end_group(),
        }
    }

    fn set_group_field(constraints: &mut EntityConstraints, kind: GroupKind, group: &str) {
        match kind {
            GroupKind::Size => constraints.set_size_group(group),
            GroupKind::End => constraints.set_end_group(group),
        };
    }

    fn join_group(&mut self, entity: &EntityHandle, group: &str, kind: GroupKind) -> bool {
        let Some(idx) = self.position_of(entity) else {
            trace!(group, "group join ignored: entity not in layout");
            return false;
        };
        if group.is_empty() {
            return false;
        }
        let key = self.entities[idx].key;
        if let Some(previous) = Self::group_field(&self.entities[idx].constraints, kind) {
            let previous = previous.to_owned();
            remove_key(self.groups_mut(kind), &previous, key);
        }
        Self::set_group_field(&mut self.entities[idx].constraints, kind, group);
        let members = self.groups_mut(kind).entry(group.to_owned()).or_default();
        if !members.contains(&key) {
            members.push(key);
        }
        true
    }

    fn leave_group(&mut self, entity: &EntityHandle, group: &str, kind: GroupKind) -> bool {
        let Some(idx) = self.position_of(entity) else {
            return false;
        };
        let key = self.entities[idx].key;
        let removed = remove_key(self.groups_mut(kind), group, key);
        if Self::group_field(&self.entities[idx].constraints, kind) == Some(group) {
            Self::set_group_field(&mut self.entities[idx].constraints, kind, "");
        }
        removed
    }

    /// Remove every index entry of the entity at `idx`.
    pub(crate) fn unindex(&mut self, idx: usize) {
        let info = &self.entities[idx];
        let key = info.key;
        if let Some(id) = info.constraints.component_id()
            && self.id_index.get(id) == Some(&key)
        {
            self.id_index.remove(id);
        }
        if let Some(group) = info.constraints.size_group() {
            remove_key(&mut self.size_groups, group, key);
        }
        if let Some(group) = info.constraints.end_group() {
            remove_key(&mut self.end_groups, group, key);
        }
    }

    /// Add index entries for the constraints of the entity at `idx`.
    fn reindex(&mut self, idx: usize) {
        let info = &self.entities[idx];
        let key = info.key;
        if let Some(id) = info.constraints.component_id().map(str::to_owned) {
            self.claim_id(key, id);
        }
        let info = &self.entities[idx];
        if let Some(group) = info.constraints.size_group() {
            push_key(&mut self.size_groups, group, key);
        }
        if let Some(group) = info.constraints.end_group() {
            push_key(&mut self.end_groups, group, key);
        }
    }

    /// Point `id` at `key`, clearing the id on any other entity holding it.
    fn claim_id(&mut self, key: EntityKey, id: String) {
        if let Some(prev) = self.id_index.get(&id).copied()
            && prev != key
            && let Some(other) = self.entities.iter_mut().find(|i| i.key == prev)
        {
            trace!(id = %id, from = prev.get(), to = key.get(), "component id reassigned");
            other.constraints.set_component_id("");
        }
        self.id_index.insert(id, key);
    }

    /// Forget entries whose host entity has been dropped.
    pub(crate) fn prune_dropped(&mut self) {
        let mut idx = 0;
        while idx < self.entities.len() {
            if self.entities[idx].weak().is_alive() {
                idx += 1;
            } else {
                trace!(key = self.entities[idx].key.get(), "pruning dropped entity");
                self.unindex(idx);
                self.entities.remove(idx);
            }
        }
    }
}

fn push_key(groups: &mut FxHashMap<String, Vec<EntityKey>>, group: &str, key: EntityKey) {
    let members = groups.entry(group.to_owned()).or_default();
    if !members.contains(&key) {
        members.push(key);
    }
}

fn remove_key(groups: &mut FxHashMap<String, Vec<EntityKey>>, group: &str, key: EntityKey) -> bool {
    let Some(members) = groups.get_mut(group) else {
        return false;
    };
    let before = members.len();
    members.retain(|k| *k != key);
    let removed = members.len() != before;
    if members.is_empty() {
        groups.remove(group);
    }
    removed
}
