//! End-to-end behaviour of the document model, converter and dispatcher.

use std::collections::{BTreeMap, HashMap};

use getjson::config::{AppConfig, DuplicatePolicy, RouteMissPolicy};
use getjson::convert::{ConvertError, Record, ToDocument};
use getjson::dispatch::{DispatchError, Dispatcher};
use getjson::document::{Document, DocumentError, Field, Number, Object};
use getjson::impl_to_document;
use getjson::routing::{
    HandlerGroup, ParamKind, ParamSpec, RouteError, RouteTable, RouteTableBuilder, Routes,
};

struct Student {
    name: String,
    age: u32,
}

impl Record for Student {
    fn type_name(&self) -> &'static str {
        "Student"
    }

    fn describe(&self) -> Vec<(&'static str, &dyn ToDocument)> {
        vec![("name", &self.name), ("age", &self.age)]
    }
}

impl_to_document!(record Student);

/// Group with several suffix-less handlers.
struct Legacy;

impl HandlerGroup for Legacy {
    fn base_tag(&self) -> &str {
        "legacy"
    }

    fn register(&self, routes: &mut Routes<Self>) {
        routes.handler("one", |_, _| Ok(Box::new(1)));
        routes.handler("two", |_, _| Ok(Box::new(2)));
        routes
            .handler("flag", |_, args| Ok(Box::new(args.bool("on")?)))
            .at("flag")
            .param(ParamSpec::query("on", ParamKind::Bool));
        routes
            .handler("scale", |_, args| Ok(Box::new(args.float("x")? * 2.0)))
            .at("scale")
            .param(ParamSpec::query("x", ParamKind::Float));
        routes
            .handler("hidden", |_, args| Ok(Box::new(args.str("secret")?.to_string())))
            .at("hidden")
            .param(ParamSpec::untagged("secret", ParamKind::Str));
    }
}

fn legacy(policy: DuplicatePolicy) -> Dispatcher {
    let table = RouteTableBuilder::new(policy).group(Legacy).build().unwrap();
    Dispatcher::new(table)
}

#[test]
fn test_empty_containers_at_any_level() {
    for level in 0..5 {
        assert_eq!(Document::Object(Object::empty()).to_text_at(level), "{}");
        assert_eq!(Document::array(Vec::new()).to_text_at(level), "[]");
    }
}

#[test]
fn test_duplicate_field_names_rejected() {
    assert!(Document::object(vec![
        Field::new("a", Document::Null),
        Field::new("b", Document::Null),
    ])
    .is_ok());

    let err = Document::object(vec![
        Field::new("a", Document::Null),
        Field::new("b", Document::Null),
        Field::new("a", Document::Boolean(true)),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        DocumentError::DuplicateKey {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_array_homogeneity() {
    let nulls = Document::array(vec![Document::Null, Document::Null]);
    assert!(nulls.validate_array_types());

    let mixed_with_nulls = Document::array(vec![
        Document::Null,
        Document::int(1),
        Document::Null,
        Document::int(2),
    ]);
    assert!(mixed_with_nulls.validate_array_types());

    let heterogeneous = Document::array(vec![Document::int(1), Document::string("1")]);
    assert!(!heterogeneous.validate_array_types());
}

#[test]
fn test_filter_and_map_leave_source_untouched() {
    let source = Document::array(vec![Document::int(1), Document::int(2), Document::int(3)]);
    let before = source.to_text();

    let array = source.as_array().unwrap();
    let odd = array.filter(|d| matches!(d, Document::Number(Number::Int(n)) if n % 2 == 1));
    let doubled = array.map(|d| match d {
        Document::Number(Number::Int(n)) => Document::int(n * 2),
        other => other.clone(),
    });

    assert_eq!(odd.len(), 2);
    assert_eq!(Document::Array(doubled).to_text(), "[\n  2,\n  4,\n  6\n]");
    assert_eq!(source.to_text(), before);
}

#[test]
fn test_record_conversion_keeps_declaration_order() {
    let student = Student {
        name: "Guilherme".to_string(),
        age: 21,
    };
    let document = student.to_document().unwrap();
    let object = document.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert_eq!(object.fields()[0].name, "name");
    assert_eq!(object.fields()[0].value, Document::string("Guilherme"));
    assert_eq!(object.fields()[1].name, "age");
    assert_eq!(object.fields()[1].value, Document::int(21));
}

#[test]
fn test_collections_convert_recursively() {
    let nested: Vec<BTreeMap<String, Vec<Option<i32>>>> = vec![BTreeMap::from([(
        "values".to_string(),
        vec![Some(1), None],
    )])];
    let text = nested.to_document().unwrap().to_text();
    assert_eq!(
        text,
        "[\n  {\n    \"values\": [\n      1,\n      null\n    ]\n  }\n]"
    );

    let keyed: HashMap<u8, &str> = HashMap::from([(7, "seven")]);
    assert!(matches!(
        keyed.to_document(),
        Err(ConvertError::NonStringKey { .. })
    ));
}

#[test]
fn test_dispatch_ints() {
    let dispatcher = getjson::demo_dispatcher(&AppConfig::default()).unwrap();
    let document = dispatcher.dispatch("/api/ints").unwrap();
    let array = document.as_array().unwrap();
    assert_eq!(array.len(), 3);
    assert!(array
        .elements()
        .iter()
        .all(|d| matches!(d, Document::Number(_))));
    assert_eq!(document.to_text(), "[\n  1,\n  2,\n  3\n]");
}

#[test]
fn test_dispatch_query_arguments() {
    let dispatcher = getjson::demo_dispatcher(&AppConfig::default()).unwrap();
    let document = dispatcher.dispatch("/api/args?n=2&text=PA").unwrap();
    let object = document.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object.get("PA"), Some(&Document::string("PAPA")));
}

#[test]
fn test_route_miss_yields_null_under_null_policy() {
    let mut config = AppConfig::default();
    config.routing.route_miss = RouteMissPolicy::Null;
    let dispatcher = getjson::demo_dispatcher(&config).unwrap();
    assert_eq!(dispatcher.dispatch("/nothing/here").unwrap(), Document::Null);
}

#[test]
fn test_route_miss_is_not_found_by_default() {
    let dispatcher = getjson::demo_dispatcher(&AppConfig::default()).unwrap();
    let err = dispatcher.dispatch("/nothing/here").unwrap_err();
    assert_eq!(
        err,
        DispatchError::NotFound {
            path: "/nothing/here".to_string()
        }
    );
}

#[test]
fn test_suffixless_handlers_follow_duplicate_policy() {
    let err = RouteTable::builder().group(Legacy).build().unwrap_err();
    assert!(matches!(err, RouteError::DuplicateTemplate { .. }));

    let first = legacy(DuplicatePolicy::FirstWins);
    assert_eq!(first.dispatch("/legacy/").unwrap(), Document::int(1));

    let last = legacy(DuplicatePolicy::LastWins);
    assert_eq!(last.dispatch("/legacy/").unwrap(), Document::int(2));
}

#[test]
fn test_bool_and_float_coercion() {
    let dispatcher = legacy(DuplicatePolicy::FirstWins);
    assert_eq!(
        dispatcher.dispatch("/legacy/flag?on=true").unwrap(),
        Document::Boolean(true)
    );
    assert!(matches!(
        dispatcher.dispatch("/legacy/flag?on=yes"),
        Err(DispatchError::InvalidParameter { .. })
    ));

    let scaled = dispatcher.dispatch("/legacy/scale?x=0.1").unwrap();
    assert_eq!(scaled.to_text(), "0.2");
    assert_eq!(
        dispatcher.dispatch("/legacy/scale?x=2").unwrap().to_text(),
        "4.0"
    );
    for raw in ["inf", "NaN", "infinity"] {
        let err = dispatcher
            .dispatch(&format!("/legacy/scale?x={}", raw))
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParameter { .. }));
    }
}

#[test]
fn test_untagged_parameter_is_never_bound() {
    let dispatcher = legacy(DuplicatePolicy::FirstWins);
    let err = dispatcher.dispatch("/legacy/hidden?secret=x").unwrap_err();
    assert!(matches!(err, DispatchError::MissingArgument { .. }));
}

#[test]
fn test_config_policies_drive_demo_dispatcher() {
    let mut config = AppConfig::default();
    config.routing.duplicate_routes = DuplicatePolicy::LastWins;
    let dispatcher = getjson::demo_dispatcher(&config).unwrap();
    assert_eq!(dispatcher.table().len(), 10);
    assert_eq!(dispatcher.route_miss(), RouteMissPolicy::NotFound);
}
