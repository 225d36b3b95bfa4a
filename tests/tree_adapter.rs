use std::cell::RefCell;
use std::rc::Rc;

use spaceshapes::{
    Shape, ShapeId, ShapeModel, ShapeTree, ShapeTreeAdapter, TreeModel, TreeModelEvent,
    TreeModelListener,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Seen {
    Inserted(TreeModelEvent<ShapeId>),
    Removed(TreeModelEvent<ShapeId>),
}

// Records every callback, plus the parent's child count at the time
#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<Seen>>,
    counts: RefCell<Vec<usize>>,
}

impl Recorder {
    fn note(&self, tree: &dyn TreeModel<ShapeId>, event: &TreeModelEvent<ShapeId>) {
        if let Some(&parent) = event.path.last() {
            self.counts.borrow_mut().push(tree.child_count(parent));
        }
    }
}

impl TreeModelListener<ShapeId> for Recorder {
    fn tree_nodes_inserted(&self, tree: &dyn TreeModel<ShapeId>, event: &TreeModelEvent<ShapeId>) {
        self.note(tree, event);
        self.seen.borrow_mut().push(Seen::Inserted(event.clone()));
    }

    fn tree_nodes_removed(&self, tree: &dyn TreeModel<ShapeId>, event: &TreeModelEvent<ShapeId>) {
        self.note(tree, event);
        self.seen.borrow_mut().push(Seen::Removed(event.clone()));
    }
}

// Appends its tag to a shared journal so tests can check notification order
struct Tagged {
    tag: &'static str,
    journal: Rc<RefCell<Vec<&'static str>>>,
}

impl TreeModelListener<ShapeId> for Tagged {
    fn tree_nodes_inserted(&self, _tree: &dyn TreeModel<ShapeId>, _event: &TreeModelEvent<ShapeId>) {
        self.journal.borrow_mut().push(self.tag);
    }

    fn tree_nodes_removed(&self, _tree: &dyn TreeModel<ShapeId>, _event: &TreeModelEvent<ShapeId>) {
        self.journal.borrow_mut().push(self.tag);
    }
}

struct Scene {
    model: ShapeModel,
    carrier: ShapeId,
    rectangle: ShapeId,
    oval: ShapeId,
}

fn scene() -> Scene {
    let mut model = ShapeModel::with_world(500, 500);
    let carrier = model.insert(Shape::carrier().with_size(100, 100));
    let rectangle = model.insert(Shape::rectangle());
    let oval = model.insert(Shape::oval());
    model.add(model.root(), carrier).unwrap();
    model.add(carrier, rectangle).unwrap();
    Scene {
        model,
        carrier,
        rectangle,
        oval,
    }
}

#[test]
fn test_tree_queries_follow_the_model() {
    let Scene {
        model,
        carrier,
        rectangle,
        oval,
    } = scene();
    let tree = ShapeTree::new(&model);

    assert_eq!(tree.root(), model.root());
    assert_eq!(tree.child(model.root(), 0), Some(carrier));
    assert_eq!(tree.child(carrier, 0), Some(rectangle));
    assert_eq!(tree.child(carrier, 1), None);
    assert_eq!(tree.child_count(carrier), 1);
    assert_eq!(tree.index_of_child(carrier, rectangle), Some(0));
    assert_eq!(tree.index_of_child(carrier, oval), None);
}

#[test]
fn test_only_carriers_are_branches() {
    let Scene {
        model,
        carrier,
        rectangle,
        ..
    } = scene();
    let empty = {
        let mut model = ShapeModel::with_world(10, 10);
        let id = model.insert(Shape::carrier().with_size(5, 5));
        (model, id)
    };
    let tree = ShapeTree::new(&model);

    assert!(!tree.is_leaf(model.root()));
    assert!(!tree.is_leaf(carrier));
    assert!(tree.is_leaf(rectangle));
    assert_eq!(tree.child_count(rectangle), 0);
    assert!(!ShapeTree::new(&empty.0).is_leaf(empty.1));
}

#[test]
fn test_insertion_is_republished_with_path() {
    let Scene {
        mut model,
        carrier,
        oval,
        ..
    } = scene();
    let adapter = ShapeTreeAdapter::observe(&model);
    let recorder = Rc::new(Recorder::default());
    adapter.add_tree_model_listener(&recorder);

    model.add(carrier, oval).unwrap();

    assert_eq!(
        *recorder.seen.borrow(),
        vec![Seen::Inserted(TreeModelEvent::single(
            vec![model.root(), carrier],
            1,
            oval
        ))]
    );
    assert_eq!(*recorder.counts.borrow(), vec![2]);
}

#[test]
fn test_removal_is_republished_with_prior_index() {
    let Scene {
        mut model,
        carrier,
        rectangle,
        oval,
    } = scene();
    model.add(carrier, oval).unwrap();
    let adapter = ShapeTreeAdapter::observe(&model);
    let recorder = Rc::new(Recorder::default());
    adapter.add_tree_model_listener(&recorder);

    model.remove(carrier, rectangle);

    let expected = TreeModelEvent {
        path: vec![model.root(), carrier],
        child_indices: vec![0],
        children: vec![rectangle],
    };
    assert_eq!(*recorder.seen.borrow(), vec![Seen::Removed(expected)]);
    assert_eq!(*recorder.counts.borrow(), vec![1]);
}

#[test]
fn test_listeners_are_notified_in_registration_order() {
    let Scene {
        mut model,
        carrier,
        oval,
        ..
    } = scene();
    let adapter = ShapeTreeAdapter::observe(&model);
    let journal = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::new(Tagged {
        tag: "first",
        journal: Rc::clone(&journal),
    });
    let second = Rc::new(Tagged {
        tag: "second",
        journal: Rc::clone(&journal),
    });
    adapter.add_tree_model_listener(&first);
    adapter.add_tree_model_listener(&second);

    model.add(carrier, oval).unwrap();
    model.remove(carrier, oval);

    assert_eq!(*journal.borrow(), vec!["first", "second", "first", "second"]);
}

#[test]
fn test_removed_listener_is_not_notified() {
    let Scene {
        mut model,
        carrier,
        oval,
        ..
    } = scene();
    let adapter = ShapeTreeAdapter::observe(&model);
    let kept = Rc::new(Recorder::default());
    let dropped = Rc::new(Recorder::default());
    adapter.add_tree_model_listener(&kept);
    adapter.add_tree_model_listener(&dropped);

    assert!(adapter.remove_tree_model_listener(&dropped));
    assert!(!adapter.remove_tree_model_listener(&dropped));
    assert_eq!(adapter.listener_count(), 1);

    model.add(carrier, oval).unwrap();
    assert_eq!(kept.seen.borrow().len(), 1);
    assert!(dropped.seen.borrow().is_empty());
}

#[test]
fn test_dead_listeners_are_skipped() {
    let Scene {
        mut model,
        carrier,
        oval,
        ..
    } = scene();
    let adapter = ShapeTreeAdapter::observe(&model);
    let survivor = Rc::new(Recorder::default());
    {
        let short_lived = Rc::new(Recorder::default());
        adapter.add_tree_model_listener(&short_lived);
    }
    adapter.add_tree_model_listener(&survivor);
    assert_eq!(adapter.listener_count(), 1);

    model.add(carrier, oval).unwrap();
    assert_eq!(survivor.seen.borrow().len(), 1);
}

#[test]
fn test_unsubscribed_adapter_goes_quiet() {
    let Scene {
        mut model,
        carrier,
        oval,
        ..
    } = scene();
    let adapter = ShapeTreeAdapter::observe(&model);
    let recorder = Rc::new(Recorder::default());
    adapter.add_tree_model_listener(&recorder);

    assert!(model.remove_listener(&adapter));
    model.add(carrier, oval).unwrap();
    assert!(recorder.seen.borrow().is_empty());
}

#[test]
fn test_dropping_the_adapter_detaches_it() {
    let Scene {
        mut model,
        carrier,
        oval,
        ..
    } = scene();
    let recorder = Rc::new(Recorder::default());
    {
        let adapter = ShapeTreeAdapter::observe(&model);
        adapter.add_tree_model_listener(&recorder);
    }

    model.add(carrier, oval).unwrap();
    assert!(recorder.seen.borrow().is_empty());
}

#[test]
fn test_changes_in_detached_subtrees_are_not_republished() {
    let Scene {
        mut model, oval, ..
    } = scene();
    let loose = model.insert(Shape::carrier().with_size(100, 100));
    let adapter = ShapeTreeAdapter::observe(&model);
    let recorder = Rc::new(Recorder::default());
    adapter.add_tree_model_listener(&recorder);

    model.add(loose, oval).unwrap();
    model.remove(loose, oval);
    assert!(recorder.seen.borrow().is_empty());

    model.add(model.root(), loose).unwrap();
    model.add(loose, oval).unwrap();
    assert_eq!(
        *recorder.seen.borrow(),
        vec![
            Seen::Inserted(TreeModelEvent::single(vec![model.root()], 1, loose)),
            Seen::Inserted(TreeModelEvent::single(vec![model.root(), loose], 0, oval)),
        ]
    );
}
