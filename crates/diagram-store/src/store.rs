//! The diagram store
//!
//! [`DiagramStore`] owns every element of one editing session plus the two
//! pieces of UI selection state. Operations are synchronous and total: bad
//! ids are ignored rather than reported.
//!
//! The store does not push change notifications. Consumers that redraw on
//! change poll [`DiagramStore::revisions`] and compare counters.

use tracing::{debug, trace};

use crate::core::{
    Actor, Connection, Element, ElementKind, ElementRef, Endpoint, IdGenerator, Position,
    StoreConfig, UseCase,
};

/// Change counters for each observable part of the store
///
/// Every counter only ever grows. A consumer that remembers the last value it
/// saw knows a part changed when the current value differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revisions {
    pub actors: u64,
    pub use_cases: u64,
    pub connections: u64,
    pub selection: u64,
}

/// In-memory store for one diagram editing session
///
/// Collections keep insertion order, which is also paint order: the last
/// element of each collection is drawn on top.
#[derive(Debug)]
pub struct DiagramStore {
    actors: Vec<Actor>,
    use_cases: Vec<UseCase>,
    connections: Vec<Connection>,
    selected_tool: String,
    selected_element: Option<ElementRef>,
    ids: Box<dyn IdGenerator>,
    config: StoreConfig,
    revisions: Revisions,
}

impl Default for DiagramStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store from a configuration
    pub fn with_config(config: StoreConfig) -> Self {
        let ids = config.id_strategy.generator();
        Self::with_id_generator(config, ids)
    }

    /// Create an empty store with a caller-supplied id generator
    ///
    /// The generator overrides `config.id_strategy`.
    pub fn with_id_generator(config: StoreConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            actors: Vec::new(),
            use_cases: Vec::new(),
            connections: Vec::new(),
            selected_tool: config.default_tool.clone(),
            selected_element: None,
            ids,
            config,
            revisions: Revisions::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Add an actor at the given position and return a copy of it
    pub fn add_actor(&mut self, position: Position) -> Actor {
        let actor = Actor::new(self.ids.next_id(ElementKind::Actor), position);
        trace!(actor_id = %actor.id, %position, "Adding actor");
        self.actors.push(actor.clone());
        self.revisions.actors += 1;
        debug!(actor_count = self.actors.len(), "Actor added");
        actor
    }

    /// Add a use case and return a copy of it
    ///
    /// A missing, empty or whitespace-only title falls back to the configured
    /// default title.
    pub fn add_use_case(&mut self, position: Position, title: Option<&str>) -> UseCase {
        let title = match title {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => self.config.default_use_case_title.clone(),
        };
        let use_case = UseCase::new(
            self.ids.next_id(ElementKind::UseCase),
            position,
            title,
        );
        trace!(use_case_id = %use_case.id, %position, title = %use_case.title, "Adding use case");
        self.use_cases.push(use_case.clone());
        self.revisions.use_cases += 1;
        debug!(use_case_count = self.use_cases.len(), "Use case added");
        use_case
    }

    /// Add a connection between two endpoints and return a copy of it
    ///
    /// Endpoints are not checked against stored elements.
    pub fn add_connection(
        &mut self,
        start: impl Into<Endpoint>,
        end: impl Into<Endpoint>,
    ) -> Connection {
        let connection = Connection::new(
            self.ids.next_id(ElementKind::Connection),
            start.into(),
            end.into(),
        );
        trace!(
            connection_id = %connection.id,
            start = %connection.start,
            end = %connection.end,
            "Adding connection"
        );
        self.connections.push(connection.clone());
        self.revisions.connections += 1;
        debug!(connection_count = self.connections.len(), "Connection added");
        connection
    }

    /// Remove every element with the given id from all three collections
    ///
    /// Each collection is replaced by a filtered copy, even when nothing
    /// matched. Connections attached to the removed element are kept, and a
    /// selection pointing at it is left as is.
    pub fn remove_element(&mut self, id: &str) {
        trace!(element_id = %id, "Removing element");
        let before = self.element_count();

        self.actors = std::mem::take(&mut self.actors)
            .into_iter()
            .filter(|actor| actor.id != id)
            .collect();
        self.use_cases = std::mem::take(&mut self.use_cases)
            .into_iter()
            .filter(|use_case| use_case.id != id)
            .collect();
        self.connections = std::mem::take(&mut self.connections)
            .into_iter()
            .filter(|connection| connection.id != id)
            .collect();

        self.revisions.actors += 1;
        self.revisions.use_cases += 1;
        self.revisions.connections += 1;

        debug!(
            removed = before - self.element_count(),
            actor_count = self.actors.len(),
            use_case_count = self.use_cases.len(),
            connection_count = self.connections.len(),
            "Element removal completed"
        );
    }

    /// Move an actor or use case to a new position
    ///
    /// Actors are searched first and win over a use case with the same id.
    /// Connections have no position and are never matched. Unknown ids are
    /// ignored.
    pub fn update_element_position(&mut self, id: &str, position: Position) {
        trace!(element_id = %id, %position, "Updating element position");

        if let Some(actor) = self.actors.iter_mut().find(|actor| actor.id == id) {
            actor.position = position;
            self.revisions.actors += 1;
            debug!(actor_id = %id, "Actor moved");
            return;
        }

        if let Some(use_case) = self.use_cases.iter_mut().find(|use_case| use_case.id == id) {
            use_case.position = position;
            self.revisions.use_cases += 1;
            debug!(use_case_id = %id, "Use case moved");
            return;
        }

        trace!(element_id = %id, "No positioned element with this id");
    }

    pub fn selected_tool(&self) -> &str {
        &self.selected_tool
    }

    /// Set the active tool; any string is accepted
    pub fn set_selected_tool(&mut self, tool: impl Into<String>) {
        self.selected_tool = tool.into();
        self.revisions.selection += 1;
        trace!(tool = %self.selected_tool, "Selected tool changed");
    }

    pub fn selected_element(&self) -> Option<&ElementRef> {
        self.selected_element.as_ref()
    }

    /// Set or clear the selected element
    ///
    /// The reference is stored as given, whether or not it names a stored
    /// element.
    pub fn select_element(&mut self, element: Option<ElementRef>) {
        trace!(selected = ?element, "Selected element changed");
        self.selected_element = element;
        self.revisions.selection += 1;
    }

    pub fn clear_selection(&mut self) {
        self.select_element(None);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn revisions(&self) -> Revisions {
        self.revisions
    }

    /// Look up an element by id, searching actors, use cases, then connections
    pub fn get(&self, id: &str) -> Option<Element<'_>> {
        if let Some(actor) = self.actors.iter().find(|actor| actor.id == id) {
            return Some(Element::Actor(actor));
        }
        if let Some(use_case) = self.use_cases.iter().find(|use_case| use_case.id == id) {
            return Some(Element::UseCase(use_case));
        }
        self.connections
            .iter()
            .find(|connection| connection.id == id)
            .map(Element::Connection)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all elements: actors, then use cases, then connections
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        self.actors
            .iter()
            .map(Element::Actor)
            .chain(self.use_cases.iter().map(Element::UseCase))
            .chain(self.connections.iter().map(Element::Connection))
    }

    /// Connections with at least one end attached to the given element id
    ///
    /// Useful for finding connections left dangling by [`remove_element`].
    ///
    /// [`remove_element`]: DiagramStore::remove_element
    pub fn connections_for(&self, id: &str) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|connection| connection.touches(id))
            .collect()
    }

    pub fn element_count(&self) -> usize {
        self.actors.len() + self.use_cases.len() + self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Remove all elements and reset selection to the configured defaults
    ///
    /// The id generator keeps its state, so ids are not reused.
    pub fn clear(&mut self) {
        trace!("Clearing store");
        self.actors.clear();
        self.use_cases.clear();
        self.connections.clear();
        self.selected_tool = self.config.default_tool.clone();
        self.selected_element = None;

        self.revisions.actors += 1;
        self.revisions.use_cases += 1;
        self.revisions.connections += 1;
        self.revisions.selection += 1;
        debug!("Store cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IdStrategy;

    fn sequential_store() -> DiagramStore {
        DiagramStore::with_config(StoreConfig::new().with_id_strategy(IdStrategy::Sequential))
    }

    /// Hands out the same id for every kind, to force cross-collection clashes
    #[derive(Debug)]
    struct FixedIds(&'static str);

    impl IdGenerator for FixedIds {
        fn next_id(&mut self, _kind: ElementKind) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_new_store_defaults() {
        let store = DiagramStore::new();
        assert!(store.is_empty());
        assert_eq!(store.selected_tool(), "select");
        assert!(store.selected_element().is_none());
        assert_eq!(store.revisions(), Revisions::default());
    }

    #[test]
    fn test_add_actor_appends_in_order() {
        let mut store = sequential_store();
        let first = store.add_actor(Position::new(1.0, 1.0));
        let second = store.add_actor(Position::new(2.0, 2.0));

        assert_eq!(first.id, "actor-1");
        assert_eq!(second.id, "actor-2");
        let ids: Vec<&str> = store.actors().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["actor-1", "actor-2"]);
    }

    #[test]
    fn test_add_use_case_title_defaults() {
        let mut store = sequential_store();
        assert_eq!(store.add_use_case(Position::default(), None).title, "Use Case");
        assert_eq!(store.add_use_case(Position::default(), Some("")).title, "Use Case");
        assert_eq!(store.add_use_case(Position::default(), Some("  ")).title, "Use Case");
        assert_eq!(
            store.add_use_case(Position::default(), Some("Checkout")).title,
            "Checkout"
        );
    }

    #[test]
    fn test_configured_default_title() {
        let mut store = DiagramStore::with_config(
            StoreConfig::new().with_default_use_case_title("Untitled"),
        );
        assert_eq!(store.add_use_case(Position::default(), None).title, "Untitled");
    }

    #[test]
    fn test_returned_element_is_a_copy() {
        let mut store = sequential_store();
        let mut actor = store.add_actor(Position::new(1.0, 1.0));
        actor.position = Position::new(99.0, 99.0);
        assert_eq!(store.actors()[0].position, Position::new(1.0, 1.0));
    }

    #[test]
    fn test_remove_filters_every_collection() {
        let mut store =
            DiagramStore::with_id_generator(StoreConfig::default(), Box::new(FixedIds("shared")));
        store.add_actor(Position::default());
        store.add_use_case(Position::default(), None);
        store.add_connection("a", "b");

        store.remove_element("shared");
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_bumps_all_collection_revisions() {
        let mut store = sequential_store();
        store.remove_element("missing");
        let revisions = store.revisions();
        assert_eq!(revisions.actors, 1);
        assert_eq!(revisions.use_cases, 1);
        assert_eq!(revisions.connections, 1);
        assert_eq!(revisions.selection, 0);
    }

    #[test]
    fn test_remove_keeps_selection() {
        let mut store = sequential_store();
        let actor = store.add_actor(Position::default());
        store.select_element(Some(ElementRef::new(ElementKind::Actor, actor.id.clone())));
        store.remove_element(&actor.id);
        assert_eq!(
            store.selected_element().map(|selected| selected.id.as_str()),
            Some(actor.id.as_str())
        );
    }

    #[test]
    fn test_update_prefers_actor_over_use_case() {
        let mut store =
            DiagramStore::with_id_generator(StoreConfig::default(), Box::new(FixedIds("dup")));
        store.add_actor(Position::new(0.0, 0.0));
        store.add_use_case(Position::new(0.0, 0.0), None);

        store.update_element_position("dup", Position::new(5.0, 6.0));

        assert_eq!(store.actors()[0].position, Position::new(5.0, 6.0));
        assert_eq!(store.use_cases()[0].position, Position::new(0.0, 0.0));
        assert_eq!(store.revisions().use_cases, 1);
    }

    #[test]
    fn test_each_mutation_bumps_only_its_counters() {
        let mut store =
            DiagramStore::with_id_generator(StoreConfig::default(), Box::new(FixedIds("dup")));

        let before = store.revisions();
        store.add_actor(Position::default());
        assert_eq!(store.revisions(), Revisions { actors: before.actors + 1, ..before });

        let before = store.revisions();
        store.add_use_case(Position::default(), None);
        assert_eq!(
            store.revisions(),
            Revisions { use_cases: before.use_cases + 1, ..before }
        );

        let before = store.revisions();
        store.add_connection("a", "b");
        assert_eq!(
            store.revisions(),
            Revisions { connections: before.connections + 1, ..before }
        );

        // Actor and use case share an id; only the actor moves
        let before = store.revisions();
        store.update_element_position("dup", Position::new(1.0, 1.0));
        assert_eq!(store.revisions(), Revisions { actors: before.actors + 1, ..before });

        let mut store = sequential_store();
        let use_case = store.add_use_case(Position::default(), None);
        let before = store.revisions();
        store.update_element_position(&use_case.id, Position::new(2.0, 2.0));
        assert_eq!(
            store.revisions(),
            Revisions { use_cases: before.use_cases + 1, ..before }
        );

        let before = store.revisions();
        store.update_element_position("actor-404", Position::new(3.0, 3.0));
        assert_eq!(store.revisions(), before);

        let before = store.revisions();
        store.clear();
        assert_eq!(
            store.revisions(),
            Revisions {
                actors: before.actors + 1,
                use_cases: before.use_cases + 1,
                connections: before.connections + 1,
                selection: before.selection + 1,
            }
        );
    }

    #[test]
    fn test_update_ignores_connections() {
        let mut store = sequential_store();
        let connection = store.add_connection("actor-1", "usecase-1");
        let before = store.revisions();

        store.update_element_position(&connection.id, Position::new(1.0, 1.0));

        assert_eq!(store.revisions(), before);
        assert_eq!(store.connections()[0], connection);
    }

    #[test]
    fn test_get_and_elements_order() {
        let mut store = sequential_store();
        let connection = store.add_connection("x", "y");
        let use_case = store.add_use_case(Position::default(), None);
        let actor = store.add_actor(Position::default());

        assert_eq!(store.get(&use_case.id).map(|e| e.kind()), Some(ElementKind::UseCase));
        assert!(store.contains(&connection.id));
        assert!(!store.contains("actor-99"));

        let ids: Vec<&str> = store.elements().map(|e| e.id()).collect();
        assert_eq!(ids, vec![actor.id.as_str(), use_case.id.as_str(), connection.id.as_str()]);
    }

    #[test]
    fn test_connections_for() {
        let mut store = sequential_store();
        let actor = store.add_actor(Position::default());
        let use_case = store.add_use_case(Position::default(), None);
        store.add_connection(actor.id.as_str(), use_case.id.as_str());
        store.add_connection(Position::new(0.0, 0.0), use_case.id.as_str());
        store.add_connection(Position::new(0.0, 0.0), Position::new(1.0, 1.0));

        assert_eq!(store.connections_for(&actor.id).len(), 1);
        assert_eq!(store.connections_for(&use_case.id).len(), 2);
        assert!(store.connections_for("actor-42").is_empty());
    }

    #[test]
    fn test_selection_state() {
        let mut store = sequential_store();
        store.set_selected_tool("connect");
        assert_eq!(store.selected_tool(), "connect");

        store.select_element(Some(ElementRef::new(ElementKind::UseCase, "usecase-7")));
        assert_eq!(store.selected_element().map(|r| r.kind), Some(ElementKind::UseCase));

        store.clear_selection();
        assert!(store.selected_element().is_none());
        assert_eq!(store.revisions().selection, 3);
    }

    #[test]
    fn test_clear_resets_to_config_and_keeps_ids_fresh() {
        let mut store = sequential_store();
        store.add_actor(Position::default());
        store.set_selected_tool("usecase");

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.selected_tool(), "select");
        assert_eq!(store.add_actor(Position::default()).id, "actor-2");
    }
}
