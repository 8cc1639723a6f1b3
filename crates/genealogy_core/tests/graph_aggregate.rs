use genealogy_core::{
    ConnectionKind, Gender, GenealogyConnection, GenealogyGraph, GraphListener, Marriage, Note,
    NoteContainer, NoteContainerListener, NoteOwner, Person,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Default)]
struct GraphEvents {
    log: RefCell<Vec<String>>,
}

impl GraphEvents {
    fn push(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }
}

impl NoteContainerListener for GraphEvents {
    fn note_added(&self, index: usize, note: &Note) {
        self.push(format!("note_added {index} {}", note.text()));
    }

    fn note_removed(&self, note: &Note) {
        self.push(format!("note_removed {}", note.text()));
    }
}

impl GraphListener for GraphEvents {
    fn person_added(&self, person: &Person) {
        self.push(format!("person_added {}", person.name()));
    }

    fn person_removed(&self, person: &Person) {
        self.push(format!("person_removed {}", person.name()));
    }

    fn marriage_added(&self, _marriage: &Marriage) {
        self.push("marriage_added");
    }

    fn marriage_removed(&self, _marriage: &Marriage) {
        self.push("marriage_removed");
    }

    fn graph_cleared(&self) {
        self.push("graph_cleared");
    }
}

fn named(gender: Gender, name: &str) -> Person {
    let person = Person::new(gender);
    person.set_name(name);
    person
}

#[test]
fn duplicate_add_is_rejected_silently() {
    let graph = GenealogyGraph::new();
    let events = Rc::new(GraphEvents::default());
    graph.add_listener(events.clone());
    let john = named(Gender::Male, "John");

    assert!(graph.add_person(&john));
    assert!(!graph.add_person(&john));
    assert_eq!(graph.people().len(), 1);
    assert_eq!(*events.log.borrow(), vec!["person_added John".to_string()]);
}

#[test]
fn removing_absent_entities_reports_false() {
    let graph = GenealogyGraph::new();
    assert!(!graph.remove_person(&named(Gender::Female, "Nobody")));
    assert!(!graph.remove_marriage(&Marriage::new()));
    assert!(!graph.remove_note(&Note::new("stray")));
}

#[test]
fn equal_names_are_distinct_people() {
    let graph = GenealogyGraph::new();
    let first = named(Gender::Male, "John");
    let second = named(Gender::Male, "John");

    assert!(graph.add_person(&first));
    assert!(graph.add_person(&second));
    assert_ne!(first, second);
    assert_eq!(graph.people().len(), 2);
}

#[test]
fn removing_a_person_keeps_their_links() {
    let graph = GenealogyGraph::new();
    let john = named(Gender::Male, "John");
    let marriage = Marriage::new();
    graph.add_person(&john);
    graph.add_marriage(&marriage);
    john.set_marriage(Some(&marriage));

    assert!(graph.remove_person(&john));
    assert!(!graph.contains_person(&john));
    assert_eq!(marriage.husband(), Some(john.clone()));
}

#[test]
fn clear_fires_single_event_and_empties_everything() {
    let graph = GenealogyGraph::new();
    graph.add_person(&named(Gender::Male, "John"));
    graph.add_marriage(&Marriage::new());
    graph.add_note(&Note::new("census 1901"));
    let events = Rc::new(GraphEvents::default());
    graph.add_listener(events.clone());

    graph.clear();

    assert!(graph.people().is_empty());
    assert!(graph.marriages().is_empty());
    assert!(graph.notes().is_empty());
    assert_eq!(*events.log.borrow(), vec!["graph_cleared".to_string()]);
}

#[test]
fn removed_listener_stops_receiving_events() {
    let graph = GenealogyGraph::new();
    let events = Rc::new(GraphEvents::default());
    let handle: Rc<dyn GraphListener> = events.clone();
    graph.add_listener(handle.clone());
    graph.add_listener(handle.clone());
    graph.add_marriage(&Marriage::new());
    graph.remove_listener(&handle);
    graph.add_marriage(&Marriage::new());

    assert_eq!(*events.log.borrow(), vec!["marriage_added".to_string()]);
}

#[test]
fn connections_list_spouses_then_offspring() {
    let graph = GenealogyGraph::new();
    let john = named(Gender::Male, "John");
    let mary = named(Gender::Female, "Mary");
    let ann = named(Gender::Female, "Ann");
    let marriage = Marriage::with_year(1950);
    for person in [&john, &mary, &ann] {
        graph.add_person(person);
    }
    graph.add_marriage(&marriage);
    marriage.set_husband(Some(&john));
    marriage.set_wife(Some(&mary));
    marriage.add_offspring(&ann);

    let connections = graph.connections();
    let kinds: Vec<ConnectionKind> = connections.iter().map(GenealogyConnection::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConnectionKind::Spouse,
            ConnectionKind::Spouse,
            ConnectionKind::Offspring
        ]
    );
    assert_eq!(connections[2].person, ann);
}

#[test]
fn connections_over_same_pair_are_equal_and_hash_equal() {
    let john = named(Gender::Male, "John");
    let marriage = Marriage::new();
    let first = GenealogyConnection::new(john.clone(), marriage.clone());
    let second = GenealogyConnection::new(john.clone(), marriage.clone());

    let mut set = HashSet::new();
    set.insert(first.clone());
    assert!(set.contains(&second));
    assert_eq!(first, second);
    assert!(!first.is_offspring_connection());
}

#[test]
fn note_container_fires_added_with_index_and_removed() {
    let graph = GenealogyGraph::new();
    let events = Rc::new(GraphEvents::default());
    graph.add_listener(events.clone());
    let a = Note::new("A");
    let b = Note::new("B");

    assert!(graph.add_note(&a));
    assert!(graph.add_note_at(0, &b));
    assert!(!graph.add_note(&a));
    assert!(graph.remove_note(&a));

    assert_eq!(graph.notes(), vec![b.clone()]);
    assert_eq!(
        *events.log.borrow(),
        vec![
            "note_added 0 A".to_string(),
            "note_added 0 B".to_string(),
            "note_removed A".to_string(),
        ]
    );
}

#[test]
fn out_of_range_insert_is_rejected() {
    let person = named(Gender::Female, "Mary");
    let note = Note::new("far away");
    assert!(!person.add_note_at(3, &note));
    assert!(person.notes().is_empty());
}

#[test]
fn note_owner_delegates_to_wrapped_container() {
    let person = named(Gender::Male, "John");
    let owner = NoteOwner::from(person.clone());
    let note = Note::new("baptism record");

    assert!(owner.add_note(&note));
    assert_eq!(person.notes(), vec![note.clone()]);
    assert_eq!(owner.index_of_note(&note), Some(0));
    assert_ne!(owner, NoteOwner::from(GenealogyGraph::new()));
}
