//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for Leptos, bound once on the document.
//! Draggable elements carry `data-drag-id`, drop zones carry
//! `data-drop-zone`; each event resolves its zone through the nearest
//! ancestor with that attribute, so elements rendered later need no wiring.

use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, EventTarget, Node};

/// Attribute naming the drop zone an element belongs to
pub const DROP_ZONE_ATTR: &str = "data-drop-zone";
/// Attribute carrying the id of a draggable element
pub const DRAG_ID_ATTR: &str = "data-drag-id";
/// DataTransfer format the dragged id is written under
pub const DRAG_PAYLOAD_FORMAT: &str = "text/plain";

/// Maps `data-drop-zone` values to typed targets
#[derive(Clone, Debug)]
pub struct DropRegistry<T> {
    zones: HashMap<String, T>,
}

impl<T> Default for DropRegistry<T> {
    fn default() -> Self {
        Self { zones: HashMap::new() }
    }
}

impl<T: Clone> DropRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, target: T) {
        self.zones.insert(key.into(), target);
    }

    /// Target for a zone key; `None` for a missing or unknown key
    pub fn resolve(&self, key: Option<&str>) -> Option<T> {
        key.and_then(|k| self.zones.get(k)).cloned()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for DropRegistry<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            zones: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}

/// DnD state signals
pub struct DndSignals<T: 'static> {
    pub dragging_id_read: ReadSignal<Option<String>>,
    pub dragging_id_write: WriteSignal<Option<String>>,
    /// Zone currently under the pointer
    pub hover_target_read: ReadSignal<Option<T>>,
    pub hover_target_write: WriteSignal<Option<T>>,
}

impl<T: 'static> Clone for DndSignals<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for DndSignals<T> {}

pub fn create_dnd_signals<T>() -> DndSignals<T>
where
    T: Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<String>);
    let (hover_target_read, hover_target_write) = signal(None::<T>);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        hover_target_read,
        hover_target_write,
    }
}

/// End drag operation
pub fn end_drag<T: Send + Sync + 'static>(dnd: &DndSignals<T>) {
    dnd.dragging_id_write.set(None);
    dnd.hover_target_write.set(None);
}

/// Element for an event target; text nodes resolve to their parent.
fn element_of(target: &EventTarget) -> Option<Element> {
    if let Some(el) = target.dyn_ref::<Element>() {
        return Some(el.clone());
    }
    target.dyn_ref::<Node>().and_then(Node::parent_element)
}

/// A node in a tree whose attributes can be read while walking upward
pub trait AncestorAttrs: Sized {
    fn attr(&self, name: &str) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

impl AncestorAttrs for Element {
    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }
}

/// Value of `name` on `start` or its nearest ancestor carrying it
pub fn nearest_attr<N: AncestorAttrs>(start: N, name: &str) -> Option<String> {
    let mut node = Some(start);
    while let Some(current) = node {
        if let Some(value) = current.attr(name) {
            return Some(value);
        }
        node = current.parent();
    }
    None
}

fn closest_attr(target: Option<EventTarget>, attr: &str) -> Option<String> {
    nearest_attr(element_of(&target?)?, attr)
}

/// `data-drop-zone` of the nearest zone enclosing `target`
pub fn drop_zone_key(target: Option<EventTarget>) -> Option<String> {
    closest_attr(target, DROP_ZONE_ATTR)
}

/// `data-drag-id` of the nearest draggable enclosing `target`
pub fn drag_id(target: Option<EventTarget>) -> Option<String> {
    closest_attr(target, DRAG_ID_ATTR)
}

/// Dragged id: the DataTransfer payload, or the tracked id when the
/// payload is missing or empty.
pub fn pick_payload(transfer: Option<String>, dragging: Option<String>) -> Option<String> {
    transfer.filter(|s| !s.is_empty()).or(dragging)
}

fn listen(doc: &web_sys::Document, event: &str, handler: impl FnMut(DragEvent) + 'static) {
    let cb = Closure::<dyn FnMut(DragEvent)>::new(handler);
    let _ = doc.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

/// Bind the drag sequence on the document. `on_drop` receives the dragged
/// id and the resolved target; drops outside any registered zone are
/// ignored.
pub fn bind_document_dnd<T, F>(dnd: DndSignals<T>, registry: DropRegistry<T>, on_drop: F)
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(String, T) + 'static,
{
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let registry = Rc::new(registry);

    listen(&doc, "dragstart", move |ev: DragEvent| {
        let Some(id) = drag_id(ev.target()) else {
            return;
        };
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data(DRAG_PAYLOAD_FORMAT, &id);
            dt.set_effect_allowed("move");
        }
        dnd.dragging_id_write.set(Some(id));
    });

    for event in ["dragenter", "dragover"] {
        let registry = registry.clone();
        listen(&doc, event, move |ev: DragEvent| {
            let Some(target) = registry.resolve(drop_zone_key(ev.target()).as_deref()) else {
                return;
            };
            ev.prevent_default();
            if let Some(dt) = ev.data_transfer() {
                dt.set_drop_effect("move");
            }
            if dnd.hover_target_read.get_untracked().as_ref() != Some(&target) {
                dnd.hover_target_write.set(Some(target));
            }
        });
    }

    {
        let registry = registry.clone();
        listen(&doc, "dragleave", move |ev: DragEvent| {
            // Moving between children of the same zone keeps the highlight
            let entering = registry.resolve(drop_zone_key(ev.related_target()).as_deref());
            if dnd.hover_target_read.get_untracked() != entering {
                dnd.hover_target_write.set(entering);
            }
        });
    }

    listen(&doc, "drop", move |ev: DragEvent| {
        let Some(target) = registry.resolve(drop_zone_key(ev.target()).as_deref()) else {
            end_drag(&dnd);
            return;
        };
        ev.prevent_default();
        let transfer = ev
            .data_transfer()
            .and_then(|dt| dt.get_data(DRAG_PAYLOAD_FORMAT).ok());
        let dragged = pick_payload(transfer, dnd.dragging_id_read.get_untracked());
        end_drag(&dnd);
        if let Some(id) = dragged {
            on_drop(id, target);
        }
    });

    listen(&doc, "dragend", move |_ev: DragEvent| {
        end_drag(&dnd);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Zone {
        Left,
        Right,
    }

    #[test]
    fn test_registry_resolves_known_keys() {
        let registry: DropRegistry<Zone> = [("left", Zone::Left), ("right", Zone::Right)]
            .into_iter()
            .collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve(Some("left")), Some(Zone::Left));
        assert_eq!(registry.resolve(Some("middle")), None);
        assert_eq!(registry.resolve(None), None);
    }

    #[test]
    fn test_registry_insert_overwrites() {
        let mut registry = DropRegistry::new();
        registry.insert("zone", Zone::Left);
        registry.insert("zone", Zone::Right);
        assert_eq!(registry.resolve(Some("zone")), Some(Zone::Right));
    }

    /// Index-based stand-in for a DOM subtree
    #[derive(Clone, Copy)]
    struct TreeNode<'a> {
        tree: &'a [(Option<usize>, &'a [(&'a str, &'a str)])],
        index: usize,
    }

    impl AncestorAttrs for TreeNode<'_> {
        fn attr(&self, name: &str) -> Option<String> {
            let (_, attrs) = self.tree[self.index];
            attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
        }

        fn parent(&self) -> Option<Self> {
            let (parent, _) = self.tree[self.index];
            parent.map(|index| TreeNode { tree: self.tree, index })
        }
    }

    // section[data-drop-zone] > article[data-drag-id] > span, plus a detached div
    const TREE: &[(Option<usize>, &[(&str, &str)])] = &[
        (None, &[(DROP_ZONE_ATTR, "left"), ("class", "quadrant")]),
        (Some(0), &[(DRAG_ID_ATTR, "t1")]),
        (Some(1), &[("class", "title")]),
        (None, &[("class", "detached")]),
    ];

    fn node(index: usize) -> TreeNode<'static> {
        TreeNode { tree: TREE, index }
    }

    #[test]
    fn test_nearest_attr_walks_up_from_child() {
        assert_eq!(nearest_attr(node(2), DRAG_ID_ATTR), Some("t1".to_string()));
        assert_eq!(nearest_attr(node(2), DROP_ZONE_ATTR), Some("left".to_string()));
        assert_eq!(nearest_attr(node(1), DRAG_ID_ATTR), Some("t1".to_string()));
    }

    #[test]
    fn test_nearest_attr_outside_any_zone() {
        assert_eq!(nearest_attr(node(3), DROP_ZONE_ATTR), None);
        assert_eq!(nearest_attr(node(0), DRAG_ID_ATTR), None);
    }

    #[test]
    fn test_nested_target_resolves_through_registry() {
        let registry: DropRegistry<Zone> = [("left", Zone::Left)].into_iter().collect();
        let key = nearest_attr(node(2), DROP_ZONE_ATTR);
        assert_eq!(registry.resolve(key.as_deref()), Some(Zone::Left));
        let key = nearest_attr(node(3), DROP_ZONE_ATTR);
        assert_eq!(registry.resolve(key.as_deref()), None);
    }

    #[test]
    fn test_pick_payload_prefers_transfer() {
        assert_eq!(
            pick_payload(Some("a".to_string()), Some("b".to_string())),
            Some("a".to_string())
        );
        assert_eq!(pick_payload(Some(String::new()), Some("b".to_string())), Some("b".to_string()));
        assert_eq!(pick_payload(None, None), None);
    }
}
