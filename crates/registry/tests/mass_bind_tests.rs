//! Bulk rebinding tests.

use std::sync::Arc;

use rebind_core::{arg, ContractDescriptor, MethodDecl, ParamKind, Value};
use rebind_registry::{
    BindMode, ContractRegistry, RegistryConfig, SkipReason, Source, TypeCatalog,
};

struct Greeter {
    name: String,
}

fn speaker() -> ContractDescriptor {
    ContractDescriptor::interface("Speaker")
        .method(MethodDecl::new("greet", Vec::new()).returns(ParamKind::String))
        .method(MethodDecl::new("shout", Vec::new()).returns(ParamKind::String))
}

fn greeter_catalog() -> Arc<TypeCatalog> {
    let catalog = TypeCatalog::shared();
    catalog
        .register_method::<Greeter, _, _, _>("Greeter", "greet", Vec::new(), |this, _| {
            Ok(Value::String(format!("hello from {}", this.name)))
        })
        .register_method::<Greeter, _, _, _>("Greeter", "whisper", Vec::new(), |_, _| {
            Ok(Value::String("psst".into()))
        })
        .register_function("Greeter", "shout", vec![ParamKind::String], |args| {
            Ok(Value::String(arg::<String>(args, 0)?.to_uppercase()))
        });
    catalog
}

fn greeter(catalog: &TypeCatalog, name: &str) -> rebind_core::ObjectRef {
    catalog.instance(
        "Greeter",
        Greeter {
            name: name.to_string(),
        },
    )
}

mod instance_tests {
    use super::*;

    #[test]
    fn test_greet_scenario() {
        let catalog = greeter_catalog();
        let (registry, proxy) =
            ContractRegistry::create(speaker(), catalog.clone()).expect("valid");
        let alice = greeter(&catalog, "alice");

        let report = registry.mass_bind_instance(&alice);

        let greet = registry.signature("greet", &[]).expect("declared");
        let shout = registry.signature("shout", &[]).expect("declared");
        assert!(report.is_bound(&greet));
        assert_eq!(report.bound_count(), 1);
        assert_eq!(registry.undefined_signatures(), vec![shout.clone()]);
        assert_eq!(
            proxy.dispatch(&greet, &[]).expect("bound"),
            Value::String("hello from alice".into())
        );
        assert!(proxy.dispatch(&shout, &[]).expect_err("undefined").is_undefined());

        // whisper has no contract method; the static shout takes a parameter
        assert_eq!(report.skipped_count, 2);
        assert!(report
            .skipped
            .iter()
            .any(|s| s.name == "whisper" && s.reason == SkipReason::NoMatchingSignature));
        assert!(report
            .skipped
            .iter()
            .any(|s| s.name == "shout" && s.reason == SkipReason::ReceiverKindMismatch));
    }

    #[test]
    fn test_second_instance_replaces_receiver() {
        let catalog = greeter_catalog();
        let (registry, proxy) =
            ContractRegistry::create(speaker(), catalog.clone()).expect("valid");
        let greet = registry.signature("greet", &[]).expect("declared");

        registry.mass_bind_instance(&greeter(&catalog, "alice"));
        let bob = greeter(&catalog, "bob");
        registry.mass_bind_instance(&bob);

        assert_eq!(
            proxy.dispatch(&greet, &[]).expect("bound"),
            Value::String("hello from bob".into())
        );
        let binding = registry.binding(&greet).expect("bound");
        assert!(binding.receiver().is_some_and(|r| r.ptr_eq(&bob)));
    }

    #[test]
    fn test_instance_mode_from_type_has_no_receiver() {
        let catalog = greeter_catalog();
        let (registry, _proxy) = ContractRegistry::create(speaker(), catalog).expect("valid");

        let report = registry.mass_bind(&Source::Type("Greeter".into()), BindMode::Instance);

        assert_eq!(report.bound_count(), 0);
        assert_eq!(registry.undefined_signatures().len(), 2);
        assert!(report
            .skipped
            .iter()
            .filter(|s| s.name != "shout")
            .all(|s| s.reason == SkipReason::MissingReceiver));
    }

    #[test]
    fn test_unmatched_methods_keep_their_binding() {
        let catalog = greeter_catalog();
        catalog.register_function("Loud", "shout", Vec::new(), |_| Ok(Value::String("HEY".into())));
        let (registry, proxy) =
            ContractRegistry::create(speaker(), catalog.clone()).expect("valid");
        let shout = registry.signature("shout", &[]).expect("declared");

        registry.mass_bind_static("Loud");
        registry.mass_bind_instance(&greeter(&catalog, "carol"));

        assert!(registry.undefined_signatures().is_empty());
        assert_eq!(
            proxy.dispatch(&shout, &[]).expect("still bound"),
            Value::String("HEY".into())
        );
    }
}

mod static_tests {
    use super::*;

    fn math_catalog() -> Arc<TypeCatalog> {
        let catalog = TypeCatalog::shared();
        let int2 = vec![ParamKind::Integer, ParamKind::Integer];
        catalog
            .register_function("Math", "add", int2.clone(), |args| {
                Ok(Value::Int(arg::<i64>(args, 0)? + arg::<i64>(args, 1)?))
            })
            .register_function("Math", "add", int2.clone(), |args| {
                Ok(Value::Int(arg::<i64>(args, 0)? + arg::<i64>(args, 1)? + 100))
            })
            .register_function("Math", "add", vec![ParamKind::Integer], |args| {
                Ok(Value::Int(arg::<i64>(args, 0)?))
            })
            .register_method::<i64, _, _, _>("Math", "sub", int2, |base, args| {
                Ok(Value::Int(base - arg::<i64>(args, 0)? - arg::<i64>(args, 1)?))
            });
        catalog
    }

    fn arithmetic() -> ContractDescriptor {
        let int2 = vec![ParamKind::Integer, ParamKind::Integer];
        ContractDescriptor::interface("Arithmetic")
            .method(MethodDecl::new("add", int2.clone()).returns(ParamKind::Integer))
            .method(MethodDecl::new("sub", int2).returns(ParamKind::Integer))
    }

    #[test]
    fn test_later_member_wins_overload_collision() {
        let (registry, proxy) =
            ContractRegistry::create(arithmetic(), math_catalog()).expect("valid");

        let report = registry.mass_bind_static("Math");

        assert_eq!(report.bound_count(), 1);
        assert_eq!(
            proxy.call("add", &[Value::Int(1), Value::Int(2)]).expect("bound"),
            Value::Int(103)
        );
    }

    #[test]
    fn test_static_mode_skips_instance_members() {
        let (registry, _proxy) =
            ContractRegistry::create(arithmetic(), math_catalog()).expect("valid");

        let report = registry.mass_bind_static("Math");

        let sub = registry.signature("sub", &[ParamKind::Integer, ParamKind::Integer]);
        assert_eq!(registry.undefined_signatures(), vec![sub.expect("declared")]);
        assert_eq!(report.skipped_count, 2);
        assert!(report
            .skipped
            .iter()
            .any(|s| s.name == "sub" && s.reason == SkipReason::ReceiverKindMismatch));
        assert!(report
            .skipped
            .iter()
            .any(|s| s.name == "add" && s.reason == SkipReason::NoMatchingSignature));
        // Matched candidates always carry a contract signature, so binding never fails.
        assert!(!report
            .skipped
            .iter()
            .any(|s| matches!(s.reason, SkipReason::BindFailed(_))));
    }

    #[test]
    fn test_static_mode_from_instance_binds_without_receiver() {
        let catalog = math_catalog();
        let (registry, proxy) =
            ContractRegistry::create(arithmetic(), catalog.clone()).expect("valid");
        let base = catalog.instance("Math", 10_i64);

        registry.mass_bind(&Source::Instance(base.clone()), BindMode::Static);
        let add = registry
            .signature("add", &[ParamKind::Integer, ParamKind::Integer])
            .expect("declared");
        assert!(registry.binding(&add).expect("bound").receiver().is_none());

        registry.mass_bind_instance(&base);
        assert_eq!(
            proxy.call("sub", &[Value::Int(3), Value::Int(2)]).expect("bound"),
            Value::Int(5)
        );
    }

    #[test]
    fn test_unknown_type_binds_nothing() {
        let (registry, _proxy) =
            ContractRegistry::create(arithmetic(), math_catalog()).expect("valid");

        let report = registry.mass_bind_static("Nowhere");

        assert_eq!(report.bound_count(), 0);
        assert_eq!(report.skipped_count, 0);
        assert_eq!(registry.undefined_signatures().len(), 2);
    }

    #[test]
    fn test_skipped_capture_can_be_disabled() {
        let config = RegistryConfig::default().with_capture_skipped(false);
        let (registry, _proxy) =
            ContractRegistry::with_config(arithmetic(), math_catalog(), config).expect("valid");

        let report = registry.mass_bind_static("Math");

        assert!(report.skipped.is_empty());
        assert_eq!(report.skipped_count, 2);
        assert_eq!(report.bound_count(), 1);
    }
}
