/// Native entry point: inspect a project file
///
/// Prints every view with its breadcrumb path and hotspot counts, then
/// lists hotspots whose links point at views, units or assets that no
/// longer exist.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hotmap::kv_store::{FileKeyValueStore, MemoryKeyValueStore};
    use hotmap::EditorConfig;

    let config = match FileKeyValueStore::in_config_dir() {
        Some(store) => EditorConfig::load_or_default(&store),
        None => EditorConfig::load_or_default(&MemoryKeyValueStore::new()),
    };

    // RUST_LOG wins over the stored preference
    let level = config.preferences.log_level.to_level_filter().to_string();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: hotmap-native <project.json>");
        std::process::exit(2);
    };

    if let Err(e) = native::report(&path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use hotmap::model::HotspotKind;
    use hotmap::navigator::{breadcrumb_path, entry_views, Catalog};
    use hotmap::store::{JsonProjectStore, ProjectStore, StoreError};

    pub fn report(path: &str) -> Result<(), StoreError> {
        let store = JsonProjectStore::open(path)?;
        let data = store.data();
        let catalog = Catalog::load(&store, data.project_id())?;

        println!(
            "{} ({}), format {}",
            data.metadata.name,
            data.project_id(),
            data.version
        );
        match entry_views(&data.views).as_slice() {
            [root] => println!("Entry view: {}", root.title),
            roots => println!("Warning: {} root views, expected exactly one", roots.len()),
        }

        let mut broken = Vec::new();
        for view in &data.views {
            let crumbs = match breadcrumb_path(&view.id, &data.views) {
                Ok(path) => path
                    .iter()
                    .map(|v| v.title.as_str())
                    .collect::<Vec<_>>()
                    .join(" > "),
                Err(e) => format!("<{}>", e),
            };
            let hotspots = store.load_hotspots(&view.id)?;
            let counts = HotspotKind::all()
                .iter()
                .map(|&kind| {
                    let n = hotspots.iter().filter(|h| h.kind() == kind).count();
                    format!("{} {}", n, kind.name())
                })
                .collect::<Vec<_>>()
                .join(", ");

            println!();
            println!("{} [{}]", crumbs, view.kind.name());
            println!("  {}", counts);
            if let Some(size) = store.resolve_image_size(view) {
                println!("  image {}x{}", size.width, size.height);
            }

            broken.extend(
                hotspots
                    .into_iter()
                    .filter(|h| !catalog.link_exists(&h.link))
                    .map(|h| (view.title.clone(), h)),
            );
        }

        println!();
        if broken.is_empty() {
            println!("No broken links");
        } else {
            println!("{} broken links:", broken.len());
            for (view, hotspot) in broken {
                println!("  {} / {}: {:?}", view, hotspot.label, hotspot.link);
            }
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
