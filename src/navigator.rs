//! View graph navigation.
//!
//! Views form a tree through `parent_id`; hotspots add edges to views, units
//! and assets. Everything here is read-only over the data: links are
//! resolved, never repaired.

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;

use crate::model::{
    Asset, AssetId, Hotspot, HotspotId, HotspotLink, Unit, UnitId, View, ViewId,
};
use crate::store::{ProjectStore, StoreError};

/// Errors from walking the view tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// View id not present in the project
    #[error("Unknown view: {0}")]
    UnknownView(ViewId),

    /// Parent pointers loop back on themselves
    #[error("Cyclic parent chain detected at view {0}")]
    CycleDetected(ViewId),
}

/// What activating a hotspot does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotspotAction {
    NavigateToView(ViewId),
    OpenUnit(UnitId),
    OpenAsset(AssetId),
    None,
}

impl HotspotAction {
    /// Action for a link, without checking that the target exists.
    pub fn from_link(link: &HotspotLink) -> Self {
        match link {
            HotspotLink::View(id) => HotspotAction::NavigateToView(id.clone()),
            HotspotLink::Unit(id) => HotspotAction::OpenUnit(id.clone()),
            HotspotLink::Asset(id) => HotspotAction::OpenAsset(id.clone()),
            HotspotLink::None => HotspotAction::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, HotspotAction::None)
    }
}

/// Action a hotspot triggers, without checking that the target exists.
///
/// The link is a single tagged value, so view, unit and asset links can
/// never compete.
pub fn resolve_hotspot_action(hotspot: &Hotspot) -> HotspotAction {
    HotspotAction::from_link(&hotspot.link)
}

/// Ids of the regions a camera hotspot highlights. Empty for other kinds.
pub fn camera_highlight(hotspot: &Hotspot) -> BTreeSet<HotspotId> {
    hotspot.linked_hotspots().cloned().unwrap_or_default()
}

/// Path from the root down to `view_id`, root first.
///
/// A parent id that matches no view ends the walk there. Cyclic parent data
/// is reported as an error.
pub fn breadcrumb_path<'a>(
    view_id: &str,
    views: &'a [View],
) -> Result<Vec<&'a View>, NavigationError> {
    let by_id: HashMap<&str, &View> = views.iter().map(|v| (v.id.as_str(), v)).collect();

    let mut current = *by_id
        .get(view_id)
        .ok_or_else(|| NavigationError::UnknownView(view_id.to_string()))?;
    let mut visited: HashSet<&str> = HashSet::new();
    let mut path = Vec::new();

    loop {
        if !visited.insert(current.id.as_str()) {
            log::warn!("Cyclic parent chain at view {}", current.id);
            return Err(NavigationError::CycleDetected(current.id.clone()));
        }
        path.push(current);

        let Some(parent_id) = current.parent_id.as_deref() else {
            break;
        };
        match by_id.get(parent_id) {
            Some(parent) => current = parent,
            None => {
                log::warn!(
                    "View {} points at missing parent {}, treating it as a root",
                    current.id,
                    parent_id
                );
                break;
            }
        }
    }

    path.reverse();
    Ok(path)
}

/// All views without a parent.
pub fn entry_views(views: &[View]) -> Vec<&View> {
    views.iter().filter(|v| v.is_root()).collect()
}

/// The project's entry view, when exactly one root exists.
///
/// Zero or several roots are a project setup problem and yield None.
pub fn entry_view(views: &[View]) -> Option<&View> {
    let roots = entry_views(views);
    match roots.as_slice() {
        [root] => Some(root),
        _ => {
            log::debug!("Project has {} root views", roots.len());
            None
        }
    }
}

/// Direct children of a view, in stored order.
pub fn children_of<'a>(view_id: &str, views: &'a [View]) -> Vec<&'a View> {
    views
        .iter()
        .filter(|v| v.parent_id.as_deref() == Some(view_id))
        .collect()
}

/// Remove a view and re-parent its children to the removed view's parent.
pub fn splice_out_view(views: &mut Vec<View>, view_id: &str) -> Result<View, NavigationError> {
    let index = views
        .iter()
        .position(|v| v.id == view_id)
        .ok_or_else(|| NavigationError::UnknownView(view_id.to_string()))?;
    let removed = views.remove(index);

    for child in views
        .iter_mut()
        .filter(|v| v.parent_id.as_deref() == Some(view_id))
    {
        log::debug!(
            "Re-parenting view {} from {} to {:?}",
            child.id,
            view_id,
            removed.parent_id
        );
        child.parent_id = removed.parent_id.clone();
    }

    Ok(removed)
}

/// Lookup tables for everything a hotspot can link to.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    views: HashMap<ViewId, View>,
    units: HashMap<UnitId, Unit>,
    assets: HashMap<AssetId, Asset>,
}

impl Catalog {
    pub fn new(views: Vec<View>, units: Vec<Unit>, assets: Vec<Asset>) -> Self {
        Self {
            views: views.into_iter().map(|v| (v.id.clone(), v)).collect(),
            units: units.into_iter().map(|u| (u.id.clone(), u)).collect(),
            assets: assets.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    /// Load the catalog of a project from a store.
    pub fn load(store: &dyn ProjectStore, project_id: &str) -> Result<Self, StoreError> {
        Ok(Self::new(
            store.load_views(project_id)?,
            store.load_units(project_id)?,
            store.load_assets(project_id)?,
        ))
    }

    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.get(id)
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.get(id)
    }

    /// Whether the target of a link exists. An empty link is never broken.
    pub fn link_exists(&self, link: &HotspotLink) -> bool {
        match link {
            HotspotLink::View(id) => self.views.contains_key(id),
            HotspotLink::Unit(id) => self.units.contains_key(id),
            HotspotLink::Asset(id) => self.assets.contains_key(id),
            HotspotLink::None => true,
        }
    }

    /// Action of a hotspot; links to missing targets resolve to `None`.
    pub fn resolve(&self, hotspot: &Hotspot) -> HotspotAction {
        if !self.link_exists(&hotspot.link) {
            log::debug!(
                "Hotspot {} has a broken link {:?}",
                hotspot.id,
                hotspot.link
            );
            return HotspotAction::None;
        }
        resolve_hotspot_action(hotspot)
    }
}

/// Callback fired with the id of the view being navigated to.
pub type NavigateCallback = Box<dyn FnMut(&str)>;

/// Tracks the current view and tells the host when navigation happens.
pub struct Navigator {
    views: Vec<View>,
    current: Option<ViewId>,
    on_navigate: Option<NavigateCallback>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("views", &self.views.len())
            .field("current", &self.current)
            .finish()
    }
}

impl Navigator {
    /// Create a navigator positioned at the entry view, if there is exactly one.
    pub fn new(views: Vec<View>) -> Self {
        let current = entry_view(&views).map(|v| v.id.clone());
        Self {
            views,
            current,
            on_navigate: None,
        }
    }

    /// Set the navigation handler
    pub fn on_navigate<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_navigate = Some(Box::new(handler));
        self
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn current_view(&self) -> Option<&View> {
        let id = self.current.as_deref()?;
        self.views.iter().find(|v| v.id == id)
    }

    /// Breadcrumb path of the current view. Empty when no view is current.
    pub fn breadcrumbs(&self) -> Result<Vec<&View>, NavigationError> {
        match self.current.as_deref() {
            Some(id) => breadcrumb_path(id, &self.views),
            None => Ok(Vec::new()),
        }
    }

    /// Make `view_id` current and notify the host.
    pub fn navigate_to(&mut self, view_id: &str) -> Result<(), NavigationError> {
        if !self.views.iter().any(|v| v.id == view_id) {
            return Err(NavigationError::UnknownView(view_id.to_string()));
        }
        log::info!("Navigating to view {}", view_id);
        self.current = Some(view_id.to_string());
        if let Some(handler) = self.on_navigate.as_mut() {
            handler(view_id);
        }
        Ok(())
    }

    /// Activate a breadcrumb entry.
    pub fn activate_breadcrumb(&mut self, view_id: &str) -> Result<(), NavigationError> {
        self.navigate_to(view_id)
    }

    /// Activate a hotspot: follows view links, returns the resolved action.
    ///
    /// Unit and asset actions are left to the host.
    pub fn activate_hotspot(&mut self, hotspot: &Hotspot, catalog: &Catalog) -> HotspotAction {
        let action = catalog.resolve(hotspot);
        if let HotspotAction::NavigateToView(view_id) = &action {
            if let Err(e) = self.navigate_to(view_id) {
                log::warn!("Hotspot {} link not navigable: {}", hotspot.id, e);
                return HotspotAction::None;
            }
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::model::{Coordinate, HotspotShape, ViewType};

    fn view(id: &str, parent: Option<&str>) -> View {
        let v = View::new(id, "p1", ViewType::Facade, id.to_uppercase());
        match parent {
            Some(p) => v.with_parent(p),
            None => v,
        }
    }

    fn tree() -> Vec<View> {
        vec![
            view("root", None),
            view("east", Some("root")),
            view("floor1", Some("east")),
            view("floor2", Some("east")),
        ]
    }

    fn ids(views: &[&View]) -> Vec<String> {
        views.iter().map(|v| v.id.clone()).collect()
    }

    fn camera(linked: &[&str]) -> Hotspot {
        Hotspot::new(
            "cam",
            "root",
            "Camera Point 1",
            HotspotShape::Camera {
                position: Coordinate::new(5.0, 5.0),
                linked_hotspots: linked.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    #[test]
    fn test_breadcrumb_root_first() {
        let views = tree();
        let path = breadcrumb_path("floor2", &views).unwrap();
        assert_eq!(ids(&path), vec!["root", "east", "floor2"]);
        assert_eq!(ids(&breadcrumb_path("root", &views).unwrap()), vec!["root"]);
    }

    #[test]
    fn test_breadcrumb_detects_cycle() {
        let views = vec![view("a", Some("b")), view("b", Some("c")), view("c", Some("a"))];
        assert!(matches!(
            breadcrumb_path("a", &views),
            Err(NavigationError::CycleDetected(_))
        ));

        let self_loop = vec![view("x", Some("x"))];
        assert_eq!(
            breadcrumb_path("x", &self_loop),
            Err(NavigationError::CycleDetected("x".to_string()))
        );
    }

    #[test]
    fn test_breadcrumb_missing_parent_stops() {
        let views = vec![view("orphan", Some("gone")), view("child", Some("orphan"))];
        let path = breadcrumb_path("child", &views).unwrap();
        assert_eq!(ids(&path), vec!["orphan", "child"]);
        assert_eq!(
            breadcrumb_path("nope", &views),
            Err(NavigationError::UnknownView("nope".to_string()))
        );
    }

    #[test]
    fn test_entry_view_requires_single_root() {
        let views = tree();
        assert_eq!(entry_view(&views).map(|v| v.id.as_str()), Some("root"));

        let mut two_roots = tree();
        two_roots.push(view("other", None));
        assert_eq!(entry_views(&two_roots).len(), 2);
        assert!(entry_view(&two_roots).is_none());
        assert!(entry_view(&[]).is_none());
    }

    #[test]
    fn test_children_of() {
        let views = tree();
        assert_eq!(ids(&children_of("east", &views)), vec!["floor1", "floor2"]);
        assert!(children_of("floor1", &views).is_empty());
    }

    #[test]
    fn test_splice_out_reparents_children() {
        let mut views = tree();
        let removed = splice_out_view(&mut views, "east").unwrap();
        assert_eq!(removed.id, "east");
        assert_eq!(views.len(), 3);
        assert_eq!(ids(&children_of("root", &views)), vec!["floor1", "floor2"]);
        assert_eq!(
            ids(&breadcrumb_path("floor1", &views).unwrap()),
            vec!["root", "floor1"]
        );

        // Removing a root promotes its children to roots
        splice_out_view(&mut views, "root").unwrap();
        assert_eq!(entry_views(&views).len(), 2);

        assert!(splice_out_view(&mut views, "missing").is_err());
    }

    #[test]
    fn test_action_from_link() {
        let base = Hotspot::polygon("h", "root", "Area 1", vec![]);
        assert_eq!(resolve_hotspot_action(&base), HotspotAction::None);

        let to_view = base.clone().with_link(HotspotLink::View("east".into()));
        assert_eq!(
            resolve_hotspot_action(&to_view),
            HotspotAction::NavigateToView("east".into())
        );

        let to_unit = base.clone().with_link(HotspotLink::Unit("u1".into()));
        assert_eq!(resolve_hotspot_action(&to_unit), HotspotAction::OpenUnit("u1".into()));

        let to_asset = base.with_link(HotspotLink::Asset("a1".into()));
        assert_eq!(resolve_hotspot_action(&to_asset), HotspotAction::OpenAsset("a1".into()));
    }

    #[test]
    fn test_broken_links_resolve_to_none() {
        let catalog = Catalog::new(
            tree(),
            vec![Unit::new("u1", "p1", "A 1.01")],
            vec![Asset::new("a1", "p1", "Tour", "tour.mp4")],
        );
        let base = Hotspot::polygon("h", "root", "Area 1", vec![]);

        for (link, expected) in [
            (HotspotLink::View("east".into()), HotspotAction::NavigateToView("east".into())),
            (HotspotLink::View("deleted".into()), HotspotAction::None),
            (HotspotLink::Unit("u1".into()), HotspotAction::OpenUnit("u1".into())),
            (HotspotLink::Unit("u9".into()), HotspotAction::None),
            (HotspotLink::Asset("a1".into()), HotspotAction::OpenAsset("a1".into())),
            (HotspotLink::Asset("a9".into()), HotspotAction::None),
        ] {
            let hotspot = base.clone().with_link(link.clone());
            assert_eq!(catalog.resolve(&hotspot), expected, "{:?}", link);
        }
    }

    #[test]
    fn test_camera_highlight() {
        let cam = camera(&["h1", "h2"]);
        let expected: BTreeSet<HotspotId> = ["h1".to_string(), "h2".to_string()].into();
        assert_eq!(camera_highlight(&cam), expected);
        assert!(camera_highlight(&camera(&[])).is_empty());

        let polygon = Hotspot::polygon("h1", "root", "Area 1", vec![]);
        assert!(camera_highlight(&polygon).is_empty());
    }

    #[test]
    fn test_navigator_fires_callback() {
        let visited = Rc::new(RefCell::new(Vec::new()));
        let sink = visited.clone();
        let mut navigator =
            Navigator::new(tree()).on_navigate(move |id| sink.borrow_mut().push(id.to_string()));

        assert_eq!(navigator.current_view().map(|v| v.id.as_str()), Some("root"));

        let catalog = Catalog::new(tree(), vec![], vec![]);
        let hotspot = Hotspot::polygon("h", "root", "Area 1", vec![])
            .with_link(HotspotLink::View("floor1".into()));
        let action = navigator.activate_hotspot(&hotspot, &catalog);
        assert_eq!(action, HotspotAction::NavigateToView("floor1".into()));
        assert_eq!(
            ids(&navigator.breadcrumbs().unwrap()),
            vec!["root", "east", "floor1"]
        );

        navigator.activate_breadcrumb("east").unwrap();
        assert_eq!(*visited.borrow(), vec!["floor1", "east"]);

        assert!(navigator.navigate_to("missing").is_err());
        assert_eq!(visited.borrow().len(), 2);
    }

    #[test]
    fn test_navigator_ignores_broken_view_link() {
        let visited = Rc::new(RefCell::new(0));
        let sink = visited.clone();
        let mut navigator = Navigator::new(tree()).on_navigate(move |_| *sink.borrow_mut() += 1);
        let catalog = Catalog::new(tree(), vec![], vec![]);
        let hotspot = Hotspot::polygon("h", "root", "Area 1", vec![])
            .with_link(HotspotLink::View("deleted".into()));

        assert_eq!(navigator.activate_hotspot(&hotspot, &catalog), HotspotAction::None);
        assert_eq!(*visited.borrow(), 0);
    }
}
