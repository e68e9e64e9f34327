//! Runs parsed script statements against a diagram store

use std::collections::HashMap;
use std::fmt;

use diagram_store::core::{Element, ElementKind, ElementRef, Endpoint, StoreError};
use diagram_store::DiagramStore;
use tracing::{debug, info};

use crate::script::{Command, EndpointSpec, Reference, Statement};

/// A store plus the variables a script has bound so far
#[derive(Debug)]
pub struct Session {
    store: DiagramStore,
    bindings: HashMap<String, String>,
}

impl Session {
    pub fn new(store: DiagramStore) -> Self {
        Self {
            store,
            bindings: HashMap::new(),
        }
    }

    pub fn store(&self) -> &DiagramStore {
        &self.store
    }

    /// Execute statements in order, stopping at the first failure
    pub fn run(&mut self, statements: &[Statement]) -> Result<(), StoreError> {
        for statement in statements {
            self.execute(statement)?;
        }
        info!(
            statements = statements.len(),
            elements = self.store.element_count(),
            "Script finished"
        );
        Ok(())
    }

    /// Execute a single statement
    pub fn execute(&mut self, statement: &Statement) -> Result<(), StoreError> {
        debug!(line = statement.line, command = ?statement.command, "Executing statement");

        let created = match &statement.command {
            Command::AddActor(position) => Some(self.store.add_actor(*position).id),
            Command::AddUseCase { position, title } => Some(
                self.store
                    .add_use_case(*position, title.as_deref())
                    .id,
            ),
            Command::Connect { start, end } => {
                let start = self.resolve_endpoint(statement.line, start)?;
                let end = self.resolve_endpoint(statement.line, end)?;
                Some(self.store.add_connection(start, end).id)
            }
            Command::Move { target, position } => {
                let id = self.resolve(statement.line, target)?;
                self.store.update_element_position(&id, *position);
                None
            }
            Command::Remove(target) => {
                let id = self.resolve(statement.line, target)?;
                self.store.remove_element(&id);
                None
            }
            Command::Tool(tool) => {
                self.store.set_selected_tool(tool.as_str());
                None
            }
            Command::Select(None) => {
                self.store.clear_selection();
                None
            }
            Command::Select(Some(target)) => {
                let id = self.resolve(statement.line, target)?;
                let selected = self.element_ref(statement.line, &id)?;
                self.store.select_element(Some(selected));
                None
            }
        };

        if let (Some(name), Some(id)) = (&statement.binding, created) {
            debug!(variable = %name, element_id = %id, "Bound variable");
            self.bindings.insert(name.clone(), id);
        }

        Ok(())
    }

    fn resolve(&self, line: usize, reference: &Reference) -> Result<String, StoreError> {
        match reference {
            Reference::Id(id) => Ok(id.clone()),
            Reference::Variable(name) => self
                .bindings
                .get(name)
                .cloned()
                .ok_or_else(|| StoreError::script_error(line, format!("unbound variable ${}", name))),
        }
    }

    fn resolve_endpoint(&self, line: usize, endpoint: &EndpointSpec) -> Result<Endpoint, StoreError> {
        match endpoint {
            EndpointSpec::Point(position) => Ok(Endpoint::Point(*position)),
            EndpointSpec::Reference(reference) => {
                self.resolve(line, reference).map(Endpoint::Element)
            }
        }
    }

    /// Selection reference for an id, using the stored element's kind when it
    /// exists and the id prefix otherwise
    fn element_ref(&self, line: usize, id: &str) -> Result<ElementRef, StoreError> {
        if let Some(element) = self.store.get(id) {
            return Ok(element.to_ref());
        }
        ElementKind::from_id(id)
            .map(|kind| ElementRef::new(kind, id))
            .ok_or_else(|| {
                StoreError::script_error(line, format!("cannot tell the kind of element '{}'", id))
            })
    }
}

/// Human-readable listing of everything in a store
pub fn render_listing(store: &DiagramStore) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    write_listing(&mut out, store).unwrap_or_default();
    out
}

/// Write the listing of a store to any formatter sink
pub fn write_listing(out: &mut impl fmt::Write, store: &DiagramStore) -> fmt::Result {
    writeln!(out, "actors ({})", store.actors().len())?;
    for actor in store.actors() {
        writeln!(out, "  {}", Element::Actor(actor))?;
    }

    writeln!(out, "use cases ({})", store.use_cases().len())?;
    for use_case in store.use_cases() {
        writeln!(out, "  {}", Element::UseCase(use_case))?;
    }

    writeln!(out, "connections ({})", store.connections().len())?;
    for connection in store.connections() {
        writeln!(out, "  {}", Element::Connection(connection))?;
    }

    writeln!(out, "tool: {}", store.selected_tool())?;
    match store.selected_element() {
        Some(selected) => writeln!(out, "selected: {}", selected),
        None => writeln!(out, "selected: none"),
    }
}
