//! Typed adapters generated by `rebind_contract!`.

use rebind_core::{arg, ConversionError, DispatchError, ParamKind, Value};
use rebind_registry::{rebind_contract, RegistryConfig, TypeCatalog};

rebind_contract! {
    /// Text helpers.
    pub contract Text as TextProxy {
        fn greet(name: String) -> String;
        fn length(text: String) -> i64;
        fn clear() -> ();
    }
}

struct Formal;

fn text_catalog() -> std::sync::Arc<TypeCatalog> {
    let catalog = TypeCatalog::shared();
    catalog
        .register_method::<Formal, _, _, _>("Formal", "greet", vec![ParamKind::String], |_, args| {
            Ok(Value::String(format!("Good day, {}.", arg::<String>(args, 0)?)))
        })
        .register_function("Sloppy", "length", vec![ParamKind::String], |_| {
            Ok(Value::String("many".into()))
        });
    catalog
}

#[test]
fn test_descriptor_matches_declaration() {
    let descriptor = TextProxy::descriptor();
    assert_eq!(descriptor.name, "Text");
    assert!(descriptor.is_abstract());

    let greet = descriptor
        .find_method("greet", &[ParamKind::String])
        .expect("declared");
    assert_eq!(greet.returns, ParamKind::String);
    let clear = descriptor.find_method("clear", &[]).expect("declared");
    assert_eq!(clear.returns, ParamKind::Void);
}

#[test]
fn test_typed_calls_route_through_registry() {
    let catalog = text_catalog();
    let text = TextProxy::create(catalog.clone()).expect("valid");
    assert!(text.greet("Ada".into()).expect_err("undefined").is_undefined());

    let registry = text.get_owning_registry();
    registry.mass_bind_instance(&catalog.instance("Formal", Formal));

    assert_eq!(text.greet("Ada".into()).expect("bound"), "Good day, Ada.");
    assert!(text.clear().expect_err("undefined").is_undefined());
    assert_eq!(registry.undefined_signatures().len(), 2);
}

#[test]
fn test_wrong_return_kind_is_a_conversion_error() {
    let text = TextProxy::create(text_catalog()).expect("valid");
    text.get_owning_registry().mass_bind_static("Sloppy");

    let err = text.length("abc".into()).expect_err("returns a string");
    assert!(matches!(
        err,
        DispatchError::Conversion(ConversionError::Mismatch {
            expected: ParamKind::Integer,
            found: ParamKind::String,
        })
    ));
}

#[test]
fn test_create_with_config_applies_config() {
    let config = RegistryConfig::default().with_capture_skipped(false);
    let text = TextProxy::create_with_config(text_catalog(), config).expect("valid");
    let registry = text.get_owning_registry();
    assert!(!registry.config().capture_skipped);

    let report = registry.mass_bind_static("Sloppy");
    assert_eq!(report.bound_count(), 1);
    assert!(report.skipped.is_empty());
}
