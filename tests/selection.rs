use hypercat::{
    catalog::Catalog,
    config::Config,
    extract::{Extraction, ExtractionError, ExtractionRequest},
    provider::MemoryProvider,
    selection::{GroupPathEdit, SelectionError},
};
use tracing_subscriber::EnvFilter;

const NONE: &[&str] = &[];

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn provider() -> MemoryProvider {
    MemoryProvider::from_path("./tests/data/in_grp.json").unwrap()
}

fn catalog() -> Catalog {
    init_logging();
    Catalog::new_with_provider(&provider(), "/").unwrap()
}

fn extracted(catalog: &Catalog) -> Vec<String> {
    catalog
        .extracted_variables()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn selection_component_boundary() {
    let mut catalog = catalog();
    catalog.select(NONE, &["lon"], &Config::default()).unwrap();
    let selected = extracted(&catalog);
    assert_eq!(selected, vec!["/lon", "/g1/lon"]);
    assert!(!selected.contains(&"/lat_lon".to_string()));
}

#[test]
fn selection_union_and_intersection() {
    let mut catalog = catalog();
    let mut config = Config::default();
    config.set_union_selection(true);
    catalog.select(&["g1"], &["v3"], &config).unwrap();
    assert_eq!(
        extracted(&catalog),
        vec!["/g1/lon", "/g1/v1", "/g1/v2", "/g1/x", "/g2/v3"]
    );

    config.set_union_selection(false);
    catalog.select(&["g1"], &["v3"], &config).unwrap();
    assert!(!extracted(&catalog).contains(&"/g2/v3".to_string()));

    catalog.select(&["g1"], &["v1", "v3"], &config).unwrap();
    assert_eq!(extracted(&catalog), vec!["/g1/v1"]);
}

#[test]
fn selection_idempotent() {
    let mut catalog = catalog();
    let config = Config::default();
    catalog.select(&["g5"], &["rlev"], &config).unwrap();
    let first = catalog.extraction_list();
    catalog.select(&["g5"], &["rlev"], &config).unwrap();
    assert_eq!(first, catalog.extraction_list());
    assert_eq!(extracted(&catalog), vec!["/g5/rlev", "/g5/g5g1/rlev"]);
}

#[test]
fn selection_exclusion_involution() {
    let mut catalog = catalog();
    catalog.select(&["g1"], NONE, &Config::default()).unwrap();
    let selected = catalog.extraction_list();
    catalog.exclude();
    assert!(extracted(&catalog).contains(&"/g2/v3".to_string()));
    assert!(!extracted(&catalog).contains(&"/g1/v1".to_string()));
    // unsupported variables are never extracted
    assert!(!extracted(&catalog).contains(&"/g2/obs".to_string()));
    catalog.exclude();
    assert_eq!(selected, catalog.extraction_list());
}

#[test]
fn selection_anchored_and_non_recursive() {
    let mut catalog = catalog();
    catalog
        .select(&["g5/"], NONE, &Config::default())
        .unwrap();
    assert_eq!(extracted(&catalog), vec!["/g5/rlev"]);
    catalog.select(&["g5"], NONE, &Config::default()).unwrap();
    assert_eq!(
        extracted(&catalog),
        vec!["/g5/rlev", "/g5/g5g1/rlev", "/g5/g5g1/rz"]
    );
    assert!(matches!(
        catalog.select(&["/g5g1"], NONE, &Config::default()),
        Err(SelectionError::NoMatch(..))
    ));
    catalog
        .select(NONE, &["/g1/x"], &Config::default())
        .unwrap();
    assert_eq!(extracted(&catalog), vec!["/g1/x"]);
}

#[cfg(feature = "regex")]
#[test]
fn selection_patterns() {
    let mut catalog = catalog();
    catalog
        .select(NONE, &["v[0-9]"], &Config::default())
        .unwrap();
    assert_eq!(extracted(&catalog), vec!["/g1/v1", "/g1/v2", "/g2/v3"]);
    catalog
        .select(&["g5.*"], NONE, &Config::default())
        .unwrap();
    assert_eq!(
        extracted(&catalog),
        vec!["/g5/rlev", "/g5/g5g1/rlev", "/g5/g5g1/rz"]
    );
}

#[test]
fn selection_associated_coordinates() {
    init_logging();
    let mut request = ExtractionRequest::new();
    request.variable_selectors(["v2", "/time", "counts"]);
    let plan = Extraction::default().run(&provider(), &request).unwrap();
    let selected: Vec<&str> = plan
        .output_paths()
        .iter()
        .map(|(path, _)| path.as_str())
        .collect();
    // lat and /lon come from the coordinates attribute, time_bnds from the bounds attribute
    assert_eq!(
        selected,
        vec!["/time", "/time_bnds", "/lat", "/lon", "/g1/v2", "/g6/counts"]
    );
    assert!(plan.catalog().entry("/time_bnds").unwrap().flags().associated);
    let groups: Vec<&str> = plan
        .catalog()
        .groups()
        .filter(|group| group.is_extracted())
        .map(|group| group.path().as_str())
        .collect();
    assert_eq!(groups, vec!["/", "/g1", "/g6"]);
}

#[test]
fn selection_duplicate_output_name() {
    init_logging();
    let mut request = ExtractionRequest::new();
    request.variable_selectors(["x"]).group_path_edit(Some("/"));
    match Extraction::default().run(&provider(), &request) {
        Err(ExtractionError::SelectionError(SelectionError::NamingCollision {
            output,
            first,
            second,
        })) => {
            assert_eq!(output.as_str(), "/x");
            assert_eq!(first.as_str(), "/g1/x");
            assert_eq!(second.as_str(), "/g2/x");
        }
        result => panic!("unexpected result {result:?}"),
    }

    request.group_path_edit(Some("out"));
    let plan = Extraction::default().run(&provider(), &request).unwrap();
    assert_eq!(plan.output_path("/g1/x").unwrap().as_str(), "/out/g1/x");
    assert_eq!(plan.output_path("/g2/x").unwrap().as_str(), "/out/g2/x");
    assert_eq!(
        GroupPathEdit::parse("out:1").unwrap().to_string(),
        "out:1"
    );
}
