//! Typed adapters over [`crate::DispatchProxy`].

/// Declares a contract and generates a typed proxy for it.
///
/// ```rust
/// use rebind_registry::{rebind_contract, Callable, TypeCatalog};
/// use rebind_core::{arg, Value};
///
/// rebind_contract! {
///     /// Integer arithmetic.
///     pub contract Calculator as CalculatorProxy {
///         fn add(a: i64, b: i64) -> i64;
///         fn reset() -> ();
///     }
/// }
///
/// let calc = CalculatorProxy::create(TypeCatalog::shared()).unwrap();
/// assert!(calc.add(2, 3).unwrap_err().is_undefined());
///
/// let registry = calc.get_owning_registry();
/// let add = registry.signatures_named("add").remove(0);
/// registry
///     .bind_static(&add, Callable::function(|args| {
///         Ok(Value::Int(arg::<i64>(args, 0)? + arg::<i64>(args, 1)?))
///     }))
///     .unwrap();
/// assert_eq!(calc.add(2, 3).unwrap(), 5);
/// ```
///
/// The generated struct has `descriptor`, `create`, `create_with_config`,
/// `from_proxy`, `proxy` and `get_owning_registry` next to one method per
/// contract method, so contract methods cannot reuse those names.
#[macro_export]
macro_rules! rebind_contract {
    (
        $(#[$meta:meta])*
        $vis:vis contract $contract:ident as $proxy:ident {
            $(
                $(#[$method_meta:meta])*
                fn $method:ident($($arg:ident : $ty:ty),* $(,)?) -> $ret:ty;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $proxy {
            inner: $crate::DispatchProxy,
        }

        #[allow(dead_code)]
        impl $proxy {
            /// Descriptor of the contract this proxy implements.
            pub fn descriptor() -> $crate::__private::ContractDescriptor {
                let contract =
                    $crate::__private::ContractDescriptor::interface(stringify!($contract));
                $(
                    let params: ::std::vec::Vec<$crate::__private::ParamKind> =
                        vec![$(<$ty as $crate::__private::ValueType>::kind()),*];
                    let contract = contract.method(
                        $crate::__private::MethodDecl::new(stringify!($method), params)
                            .returns(<$ret as $crate::__private::ValueType>::kind()),
                    );
                )*
                contract
            }

            /// Creates a registry for this contract and wraps its proxy.
            pub fn create(
                catalog: ::std::sync::Arc<dyn $crate::MemberCatalog>,
            ) -> ::std::result::Result<Self, $crate::__private::ContractError> {
                let (_, inner) = $crate::ContractRegistry::create(Self::descriptor(), catalog)?;
                Ok(Self { inner })
            }

            /// Like `create`, with an explicit registry configuration.
            pub fn create_with_config(
                catalog: ::std::sync::Arc<dyn $crate::MemberCatalog>,
                config: $crate::__private::RegistryConfig,
            ) -> ::std::result::Result<Self, $crate::__private::ContractError> {
                let (_, inner) =
                    $crate::ContractRegistry::with_config(Self::descriptor(), catalog, config)?;
                Ok(Self { inner })
            }

            /// Wraps an existing proxy handle.
            pub fn from_proxy(inner: $crate::DispatchProxy) -> Self {
                Self { inner }
            }

            pub fn proxy(&self) -> &$crate::DispatchProxy {
                &self.inner
            }

            pub fn get_owning_registry(&self) -> &::std::sync::Arc<$crate::ContractRegistry> {
                self.inner.get_owning_registry()
            }

            $(
                $(#[$method_meta])*
                pub fn $method(
                    &self,
                    $($arg: $ty),*
                ) -> $crate::__private::DispatchResult<$ret> {
                    let params: ::std::vec::Vec<$crate::__private::ParamKind> =
                        vec![$(<$ty as $crate::__private::ValueType>::kind()),*];
                    let signature = $crate::__private::MethodSignature::new(
                        stringify!($contract),
                        stringify!($method),
                        params,
                    );
                    let value = self.inner.dispatch(
                        &signature,
                        &[$($crate::__private::IntoValue::into_value($arg)),*],
                    )?;
                    Ok(<$ret as $crate::__private::FromValue>::from_value(value)?)
                }
            )*
        }
    };
}
