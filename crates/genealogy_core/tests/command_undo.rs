use genealogy_core::{
    BoundedElement, Bounds, Command, CommandError, ConnectionKind, CreateMarriageCommand,
    CreateNoteCommand, CreatePersonCommand, DeleteConnectionCommand, DeleteMarriageCommand,
    DeleteNoteCommand, DeletePersonCommand, Gender, GenealogyConnection, GenealogyGraph, Marriage,
    MoveAndResizeCommand, Note, NoteContainer, Person, RenameNoteCommand, ReorderNoteCommand,
    ReparentNoteCommand,
};

fn named(gender: Gender, name: &str) -> Person {
    let person = Person::new(gender);
    person.set_name(name);
    person
}

struct Family {
    graph: GenealogyGraph,
    john: Person,
    mary: Person,
    ann: Person,
    bob: Person,
    marriage: Marriage,
}

fn family() -> Family {
    let graph = GenealogyGraph::new();
    let john = named(Gender::Male, "John");
    let mary = named(Gender::Female, "Mary");
    let ann = named(Gender::Female, "Ann");
    let bob = named(Gender::Male, "Bob");
    let marriage = Marriage::with_year(1950);
    for person in [&john, &mary, &ann, &bob] {
        graph.add_person(person);
    }
    graph.add_marriage(&marriage);
    marriage.set_husband(Some(&john));
    marriage.set_wife(Some(&mary));
    marriage.add_offspring(&ann);
    marriage.add_offspring(&bob);
    Family {
        graph,
        john,
        mary,
        ann,
        bob,
        marriage,
    }
}

fn texts(container: &impl NoteContainer) -> Vec<String> {
    container.notes().iter().map(Note::text).collect()
}

#[test]
fn create_person_undo_removes_and_restores_bounds() {
    let graph = GenealogyGraph::new();
    let person = named(Gender::Male, "John");
    let mut command = CreatePersonCommand::new(
        graph.clone(),
        person.clone(),
        Some(Bounds::new(10, 20, 120, 40)),
    );

    command.execute().unwrap();
    assert!(graph.contains_person(&person));
    assert_eq!(person.bounds(), Bounds::new(10, 20, 120, 40));

    command.undo().unwrap();
    assert!(!graph.contains_person(&person));
    assert_eq!(person.bounds(), Bounds::default());

    command.redo().unwrap();
    assert!(graph.contains_person(&person));
    assert_eq!(command.person(), &person);
    assert_eq!(command.label(), "Create Person");
}

#[test]
fn create_marriage_and_note_round_trip() {
    let graph = GenealogyGraph::new();
    let marriage = Marriage::new();
    let mut create_marriage = CreateMarriageCommand::new(graph.clone(), marriage.clone(), None);
    create_marriage.execute().unwrap();
    assert!(graph.contains_marriage(&marriage));
    create_marriage.undo().unwrap();
    assert!(graph.marriages().is_empty());

    let person = named(Gender::Female, "Mary");
    let note = Note::new("born in Leeds");
    let mut create_note = CreateNoteCommand::new(person.clone(), note.clone(), None);
    create_note.execute().unwrap();
    assert_eq!(person.notes(), vec![note.clone()]);
    create_note.undo().unwrap();
    assert!(person.notes().is_empty());
    assert_eq!(create_note.label(), "Create Note");
}

#[test]
fn delete_person_severs_and_restores_both_links() {
    let f = family();
    let mut command = DeletePersonCommand::new(f.graph.clone(), f.ann.clone());
    assert_eq!(command.label(), "Delete Ann");

    command.execute().unwrap();
    assert!(!f.graph.contains_person(&f.ann));
    assert_eq!(f.ann.parents_marriage(), None);
    assert_eq!(f.marriage.offspring(), vec![f.bob.clone()]);

    command.undo().unwrap();
    assert!(f.graph.contains_person(&f.ann));
    assert_eq!(f.ann.parents_marriage(), Some(f.marriage.clone()));
    assert!(f.marriage.has_offspring(&f.ann));

    let mut spouse = DeletePersonCommand::new(f.graph.clone(), f.john.clone());
    spouse.execute().unwrap();
    assert_eq!(f.marriage.husband(), None);
    spouse.undo().unwrap();
    assert_eq!(f.marriage.husband(), Some(f.john.clone()));
    assert_eq!(f.john.marriage(), Some(f.marriage.clone()));
}

#[test]
fn delete_marriage_undo_restores_every_link() {
    let f = family();
    let mut command = DeleteMarriageCommand::new(f.graph.clone(), f.marriage.clone());

    command.execute().unwrap();
    assert!(!f.graph.contains_marriage(&f.marriage));
    assert_eq!(f.john.marriage(), None);
    assert_eq!(f.mary.marriage(), None);
    assert_eq!(f.ann.parents_marriage(), None);
    assert_eq!(f.bob.parents_marriage(), None);
    assert!(f.marriage.offspring().is_empty());

    command.undo().unwrap();
    assert!(f.graph.contains_marriage(&f.marriage));
    assert_eq!(f.marriage.husband(), Some(f.john.clone()));
    assert_eq!(f.marriage.wife(), Some(f.mary.clone()));
    assert_eq!(f.marriage.offspring(), vec![f.ann.clone(), f.bob.clone()]);
    assert_eq!(f.john.marriage(), Some(f.marriage.clone()));
    assert_eq!(f.bob.parents_marriage(), Some(f.marriage.clone()));

    command.redo().unwrap();
    assert_eq!(f.mary.marriage(), None);
    assert!(f.graph.marriages().is_empty());
}

#[test]
fn delete_connection_severs_spouse_link() {
    let f = family();
    let connection = GenealogyConnection::new(f.mary.clone(), f.marriage.clone());
    let mut command = DeleteConnectionCommand::new(connection);

    command.execute().unwrap();
    assert_eq!(command.severed(), Some(ConnectionKind::Spouse));
    assert_eq!(f.marriage.wife(), None);

    command.undo().unwrap();
    assert_eq!(f.marriage.wife(), Some(f.mary.clone()));
}

#[test]
fn delete_connection_severs_offspring_link() {
    let f = family();
    let connection = GenealogyConnection::new(f.bob.clone(), f.marriage.clone());
    let mut command = DeleteConnectionCommand::new(connection);

    command.execute().unwrap();
    assert_eq!(command.severed(), Some(ConnectionKind::Offspring));
    assert_eq!(f.marriage.offspring(), vec![f.ann.clone()]);

    command.undo().unwrap();
    assert!(f.marriage.has_offspring(&f.bob));
    assert_eq!(f.bob.parents_marriage(), Some(f.marriage.clone()));
}

#[test]
fn delete_connection_between_strangers_is_a_no_op() {
    let stranger = named(Gender::Male, "Stranger");
    let marriage = Marriage::new();
    let mut command = DeleteConnectionCommand::new(GenealogyConnection::new(
        stranger.clone(),
        marriage.clone(),
    ));

    command.execute().unwrap();
    assert_eq!(command.severed(), None);
    command.undo().unwrap();
    assert_eq!(stranger.marriage(), None);
    assert_eq!(marriage.husband(), None);
}

#[test]
fn delete_note_restores_original_position() {
    let graph = GenealogyGraph::new();
    let notes: Vec<Note> = ["A", "B", "C"].into_iter().map(Note::new).collect();
    for note in &notes {
        graph.add_note(note);
    }

    let mut command = DeleteNoteCommand::new(graph.clone(), notes[1].clone());
    command.execute().unwrap();
    assert_eq!(texts(&graph), vec!["A", "C"]);
    command.undo().unwrap();
    assert_eq!(texts(&graph), vec!["A", "B", "C"]);
}

#[test]
fn move_and_resize_restores_previous_bounds() {
    let marriage = Marriage::new();
    marriage.set_bounds(Bounds::new(5, 5, 30, 30));
    let mut command = MoveAndResizeCommand::new(marriage.clone(), Bounds::new(50, 60, 30, 30));
    assert_eq!(command.label(), "Modify Marriage");

    command.execute().unwrap();
    assert_eq!(marriage.x(), 50);
    assert_eq!(marriage.y(), 60);
    command.undo().unwrap();
    assert_eq!(marriage.bounds(), Bounds::new(5, 5, 30, 30));

    let note = Note::new("x");
    let note_command = MoveAndResizeCommand::new(note, Bounds::default());
    assert_eq!(note_command.label(), "Modify Note");
}

#[test]
fn move_and_resize_undo_before_execute_is_an_error() {
    let mut command = MoveAndResizeCommand::new(Note::new("x"), Bounds::default());
    assert!(matches!(command.undo(), Err(CommandError::NotExecuted(_))));
}

#[test]
fn rename_note_round_trip() {
    let note = Note::new("old text");
    let mut command = RenameNoteCommand::new(note.clone(), "new text");

    command.execute().unwrap();
    assert_eq!(note.text(), "new text");
    command.undo().unwrap();
    assert_eq!(note.text(), "old text");
    command.redo().unwrap();
    assert_eq!(note.text(), "new text");
}

#[test]
fn reorder_moves_note_to_later_position_and_back() {
    let graph = GenealogyGraph::new();
    let notes: Vec<Note> = ["A", "B", "C"].into_iter().map(Note::new).collect();
    for note in &notes {
        graph.add_note(note);
    }

    let mut command = ReorderNoteCommand::new(graph.clone(), notes[0].clone());
    command.set_after_note(Some(&notes[1]));
    assert_eq!(command.target_index(), 2);

    command.execute().unwrap();
    assert_eq!(texts(&graph), vec!["B", "A", "C"]);
    command.undo().unwrap();
    assert_eq!(texts(&graph), vec!["A", "B", "C"]);
}

#[test]
fn reorder_last_note_after_first_and_back() {
    let graph = GenealogyGraph::new();
    let notes: Vec<Note> = ["A", "B", "C"].into_iter().map(Note::new).collect();
    for note in &notes {
        graph.add_note(note);
    }

    let mut command = ReorderNoteCommand::new(graph.clone(), notes[2].clone());
    command.set_after_note(Some(&notes[0]));
    assert_eq!(command.target_index(), 1);

    command.execute().unwrap();
    assert_eq!(texts(&graph), vec!["A", "C", "B"]);
    command.undo().unwrap();
    assert_eq!(texts(&graph), vec!["A", "B", "C"]);
    command.redo().unwrap();
    assert_eq!(texts(&graph), vec!["A", "C", "B"]);
}

#[test]
fn reorder_moves_note_to_earlier_position_and_back() {
    let person = named(Gender::Female, "Mary");
    let notes: Vec<Note> = ["A", "B", "C"].into_iter().map(Note::new).collect();
    for note in &notes {
        person.add_note(note);
    }

    let mut command = ReorderNoteCommand::new(person.clone(), notes[2].clone());
    command.set_after_note(None);

    command.execute().unwrap();
    assert_eq!(texts(&person), vec!["C", "A", "B"]);
    command.undo().unwrap();
    assert_eq!(texts(&person), vec!["A", "B", "C"]);
}

#[test]
fn reorder_after_last_note_moves_to_end() {
    let graph = GenealogyGraph::new();
    let notes: Vec<Note> = ["A", "B", "C"].into_iter().map(Note::new).collect();
    for note in &notes {
        graph.add_note(note);
    }

    let mut command = ReorderNoteCommand::new(graph.clone(), notes[0].clone());
    command.set_after_note(Some(&notes[2]));
    command.execute().unwrap();
    assert_eq!(texts(&graph), vec!["B", "C", "A"]);
    command.undo().unwrap();
    assert_eq!(texts(&graph), vec!["A", "B", "C"]);
}

#[test]
fn reparent_moves_note_between_containers() {
    let graph = GenealogyGraph::new();
    let person = named(Gender::Male, "John");
    let anchor = Note::new("anchor");
    let moved = Note::new("moved");
    person.add_note(&anchor);
    graph.add_note(&Note::new("first"));
    graph.add_note(&moved);

    let mut command = ReparentNoteCommand::new(person.clone(), moved.clone());
    assert!(!command.can_execute());
    command.set_old_container(graph.clone());
    command.set_after_note(Some(&anchor));
    assert!(command.can_execute());

    command.execute().unwrap();
    assert_eq!(texts(&person), vec!["anchor", "moved"]);
    assert_eq!(texts(&graph), vec!["first"]);

    command.undo().unwrap();
    assert_eq!(texts(&person), vec!["anchor"]);
    assert_eq!(texts(&graph), vec!["first", "moved"]);
}

#[test]
fn reparent_into_same_container_is_rejected() {
    let graph = GenealogyGraph::new();
    let note = Note::new("n");
    graph.add_note(&note);
    let mut command = ReparentNoteCommand::new(graph.clone(), note);
    command.set_old_container(graph.clone());

    assert!(!command.can_execute());
    assert_eq!(command.execute(), Err(CommandError::SameContainer));
}
