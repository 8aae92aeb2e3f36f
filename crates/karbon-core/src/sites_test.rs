use std::path::Path;

use super::*;

fn make_site(name: &str) -> SiteConfig {
    let mut categories = BTreeMap::new();
    categories.insert(
        "household".to_string(),
        vec!["hardware".to_string(), "paper-plastic".to_string()],
    );
    categories.insert("personal-care".to_string(), vec!["shaving".to_string()]);
    SiteConfig {
        name: name.to_string(),
        adapter: AdapterKind::Cvs,
        base_url: "https://www.cvs.com".to_string(),
        url_template: "https://www.cvs.com/shop/{category}/{subcategory}?page={page}".to_string(),
        page_size: 48,
        max_pages: 10,
        timeout_secs: 20,
        inter_page_delay_ms: 0,
        stop_on_empty_page: false,
        price_parse_policy: PriceParsePolicy::Skip,
        store: StoreInfo {
            name: "CVS Pharmacy".to_string(),
            phone: "(925) 933-8353".to_string(),
            address: "1123 S California Blvd, Walnut Creek, CA 94596".to_string(),
            coordinates: Coordinates {
                latitude: 37.896_474,
                longitude: -122.064_465,
            },
            closing_hour: ClosingHour::Text("Open 24 hours".to_string()),
        },
        categories,
    }
}

#[test]
fn tasks_cover_every_subcategory() {
    let site = make_site("cvs");
    let tasks = site.tasks();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].to_string(), "cvs/household/hardware");
    assert_eq!(tasks[1].to_string(), "cvs/household/paper-plastic");
    assert_eq!(tasks[2].to_string(), "cvs/personal-care/shaving");
}

#[test]
fn page_url_is_one_based() {
    let site = make_site("cvs");
    let task = &site.tasks()[0];
    assert_eq!(
        site.page_url(task, 0),
        "https://www.cvs.com/shop/household/hardware?page=1"
    );
    assert_eq!(
        site.page_url(task, 9),
        "https://www.cvs.com/shop/household/hardware?page=10"
    );
}

#[test]
fn page_url_fills_page_size_and_index() {
    let mut site = make_site("ace");
    site.url_template =
        "https://x.test/{category}/{subcategory}?pageSize={page_size}&start={page_index}"
            .to_string();
    site.page_size = 300;
    let task = &site.tasks()[2];
    assert_eq!(
        site.page_url(task, 2),
        "https://x.test/personal-care/shaving?pageSize=300&start=2"
    );
}

#[test]
fn validate_accepts_well_formed_sites() {
    let file = SitesFile {
        sites: vec![make_site("cvs"), make_site("safeway")],
    };
    assert!(validate_sites(&file).is_ok());
}

#[test]
fn validate_rejects_duplicate_names_case_insensitive() {
    let file = SitesFile {
        sites: vec![make_site("cvs"), make_site("CVS")],
    };
    let err = validate_sites(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
}

#[test]
fn validate_rejects_empty_name() {
    let file = SitesFile {
        sites: vec![make_site("  ")],
    };
    assert!(validate_sites(&file).is_err());
}

#[test]
fn validate_rejects_zero_max_pages() {
    let mut site = make_site("cvs");
    site.max_pages = 0;
    let err = validate_sites(&SitesFile { sites: vec![site] }).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("max_pages")));
}

#[test]
fn validate_rejects_zero_timeout() {
    let mut site = make_site("cvs");
    site.timeout_secs = 0;
    let err = validate_sites(&SitesFile { sites: vec![site] }).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("timeout_secs")));
}

#[test]
fn validate_rejects_longitude_first_coordinates() {
    let mut site = make_site("cvs");
    site.store.coordinates = Coordinates {
        latitude: -122.064_465,
        longitude: 37.896_474,
    };
    let err = validate_sites(&SitesFile { sites: vec![site] }).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("coordinates")));
}

#[test]
fn validate_rejects_template_without_placeholders() {
    let mut site = make_site("cvs");
    site.url_template = "https://www.cvs.com/shop?page={page}".to_string();
    assert!(validate_sites(&SitesFile { sites: vec![site] }).is_err());
}

#[test]
fn validate_rejects_empty_subcategory_list() {
    let mut site = make_site("cvs");
    site.categories.insert("beauty".to_string(), vec![]);
    let err = validate_sites(&SitesFile { sites: vec![site] }).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("beauty")));
}

#[test]
fn select_returns_all_when_no_filter() {
    let file = SitesFile {
        sites: vec![make_site("cvs"), make_site("safeway")],
    };
    assert_eq!(file.select(&[]).unwrap().len(), 2);
}

#[test]
fn select_filters_by_name() {
    let file = SitesFile {
        sites: vec![make_site("cvs"), make_site("safeway")],
    };
    let picked = file.select(&["Safeway".to_string()]).unwrap();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].name, "safeway");
}

#[test]
fn select_rejects_unknown_site() {
    let file = SitesFile {
        sites: vec![make_site("cvs")],
    };
    let err = file.select(&["walmart".to_string()]).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("walmart")));
}

#[test]
fn yaml_defaults_apply() {
    let yaml = r#"
sites:
  - name: cvs
    adapter: cvs
    base_url: https://www.cvs.com
    url_template: "https://www.cvs.com/shop/{category}/{subcategory}?page={page}"
    max_pages: 10
    timeout_secs: 20
    store:
      name: CVS Pharmacy
      phone: "(925) 933-8353"
      address: 1123 S California Blvd, Walnut Creek, CA 94596
      coordinates: { latitude: 37.896474574278315, longitude: -122.06446582963069 }
      closing_hour: Open 24 hours
    categories:
      household: [hardware]
"#;
    let file: SitesFile = serde_yaml::from_str(yaml).unwrap();
    let site = &file.sites[0];
    assert_eq!(site.page_size, 48);
    assert_eq!(site.inter_page_delay_ms, 0);
    assert!(!site.stop_on_empty_page);
    assert_eq!(site.price_parse_policy, PriceParsePolicy::Skip);
    assert_eq!(
        site.store.closing_hour,
        ClosingHour::Text("Open 24 hours".to_string())
    );
}

#[test]
fn yaml_parses_halt_site_policy() {
    let policy: PriceParsePolicy = serde_yaml::from_str("halt_site").unwrap();
    assert_eq!(policy, PriceParsePolicy::HaltSite);
}

#[test]
fn load_sites_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("sites.yaml");
    assert!(
        path.exists(),
        "sites.yaml missing at {path:?}; required for this test"
    );
    let result = load_sites(&path);
    assert!(result.is_ok(), "failed to load sites.yaml: {result:?}");
    let sites_file = result.unwrap();
    let names: Vec<&str> = sites_file.sites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["ace", "cvs", "safeway"]);
}

#[test]
fn load_sites_missing_file_is_io_error() {
    let err = load_sites(Path::new("/definitely/not/here/sites.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::SitesFileIo { .. }));
}
