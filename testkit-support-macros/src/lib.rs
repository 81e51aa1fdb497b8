//! Procedural macros for testkit-support
//!
//! This crate provides the `#[testkit_support::test]` attribute macro for
//! writing async tests that run under the shared runner configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use testkit_support::prelude::*;
//!
//! #[testkit_support::test]
//! async fn my_test(dir: ScopedTempDir) {
//!     write_ts_file(dir.join("src/index.ts"), "export {};").await.unwrap();
//!     assert!(dir.join("src/index.ts").exists());
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, Ident, ItemFn, Lit, Pat, Token, Type,
};

/// Configuration options for the test macro.
#[derive(Default)]
struct TestConfig {
    /// Flavor for tokio runtime ("current_thread" or "multi_thread")
    flavor: Option<String>,
    /// Test timeout in milliseconds, overriding the shared config
    timeout_ms: Option<u64>,
    /// Prefix for injected temp directories
    temp_prefix: Option<String>,
}

impl Parse for TestConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = TestConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: Lit = input.parse()?;

            match (ident.to_string().as_str(), lit) {
                ("flavor", Lit::Str(s)) => {
                    let flavor = s.value();
                    if flavor != "current_thread" && flavor != "multi_thread" {
                        return Err(syn::Error::new(
                            s.span(),
                            format!(
                                "unsupported flavor: {flavor}. \
                                 Use \"current_thread\" or \"multi_thread\""
                            ),
                        ));
                    }
                    config.flavor = Some(flavor);
                }
                ("timeout_ms", Lit::Int(i)) => {
                    config.timeout_ms = Some(i.base10_parse()?);
                }
                ("temp_prefix", Lit::Str(s)) => {
                    config.temp_prefix = Some(s.value());
                }
                ("flavor" | "temp_prefix", other) => {
                    return Err(syn::Error::new(other.span(), "expected a string literal"));
                }
                ("timeout_ms", other) => {
                    return Err(syn::Error::new(other.span(), "expected an integer literal"));
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Determines if a function parameter is requesting a temp dir fixture.
fn is_temp_dir_param(arg: &FnArg) -> bool {
    if let FnArg::Typed(pat_type) = arg {
        if let Type::Path(type_path) = &*pat_type.ty {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "ScopedTempDir";
            }
        }
    }
    false
}

/// Extracts the parameter name from a function argument.
fn get_param_name(arg: &FnArg) -> Option<&Ident> {
    if let FnArg::Typed(pat_type) = arg {
        if let Pat::Ident(pat_ident) = &*pat_type.pat {
            return Some(&pat_ident.ident);
        }
    }
    None
}

/// Test attribute macro for async tests bounded by the shared test timeout.
///
/// The test runs on a tokio runtime. Its body is raced against
/// `shared_config().test_timeout` and the test panics if the timer wins.
///
/// # Fixture Injection
///
/// A parameter of type `ScopedTempDir` receives a fresh temp directory that
/// is removed when the test finishes:
///
/// ```rust,ignore
/// #[testkit_support::test]
/// async fn test_with_dir(dir: ScopedTempDir) {
///     assert!(dir.path().is_dir());
/// }
/// ```
///
/// # Configuration Options
///
/// - `flavor = "multi_thread"` - Tokio runtime flavor (the runtime comes from
///   testkit-support's own tokio, so callers need no extra tokio features)
/// - `timeout_ms = 500` - Override the shared test timeout
/// - `temp_prefix = "build-"` - Prefix for injected temp directories
///
/// ```rust,ignore
/// #[testkit_support::test(timeout_ms = 500, flavor = "multi_thread")]
/// async fn test_fast() {
///     sleep(Duration::from_millis(10)).await;
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as TestConfig);
    let input = parse_macro_input!(item as ItemFn);

    expand_test(config, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_test(config: TestConfig, input: ItemFn) -> syn::Result<TokenStream2> {
    let name = &input.sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let output = &input.sig.output;
    let params = &input.sig.inputs;

    // Check if function is async
    if input.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            &input.sig,
            "test function must be async",
        ));
    }

    // Every parameter must be an injectable fixture
    let mut fixture_names = Vec::new();
    for arg in params {
        match get_param_name(arg) {
            Some(ident) if is_temp_dir_param(arg) => fixture_names.push(ident.clone()),
            _ => {
                return Err(syn::Error::new_spanned(
                    arg,
                    "unsupported test parameter; only `ScopedTempDir` can be injected",
                ));
            }
        }
    }

    let prefix = config.temp_prefix.as_deref().unwrap_or("test-");
    let fixture_init = fixture_names.iter().map(|ident| {
        quote! {
            let #ident = ::testkit_support::fixtures::ScopedTempDir::new(#prefix)
                .expect("failed to create temp dir fixture");
        }
    });

    let timeout = match config.timeout_ms {
        Some(ms) => quote! { ::std::time::Duration::from_millis(#ms) },
        None => quote! { ::testkit_support::config::shared_config().test_timeout },
    };

    let flavor_attr = match config.flavor.as_deref() {
        Some("multi_thread") => quote! {
            #[::testkit_support::__private::tokio::test(
                flavor = "multi_thread",
                crate = "::testkit_support::__private::tokio"
            )]
        },
        _ => quote! {
            #[::testkit_support::__private::tokio::test(
                crate = "::testkit_support::__private::tokio"
            )]
        },
    };

    let inner = format_ident!("__testkit_{}", name);

    Ok(quote! {
        #flavor_attr
        #(#attrs)*
        #vis async fn #name() #output {
            async fn #inner(#params) #output #body

            #(#fixture_init)*
            let timeout = #timeout;
            match ::testkit_support::timing::with_timeout(
                timeout,
                move || #inner(#(#fixture_names),*),
            )
            .await
            {
                ::std::result::Result::Ok(value) => value,
                ::std::result::Result::Err(err) => ::std::panic!(
                    "test `{}` did not finish within {:?}: {}",
                    ::std::stringify!(#name),
                    timeout,
                    err
                ),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::TestConfig;

    #[::core::prelude::v1::test]
    fn test_config_parse_empty() {
        let config: TestConfig = syn::parse_str("").unwrap();
        assert!(config.flavor.is_none());
        assert!(config.timeout_ms.is_none());
        assert!(config.temp_prefix.is_none());
    }

    #[::core::prelude::v1::test]
    fn test_config_parse_flavor() {
        let config: TestConfig = syn::parse_str("flavor = \"multi_thread\"").unwrap();
        assert_eq!(config.flavor, Some("multi_thread".to_string()));
    }

    #[::core::prelude::v1::test]
    fn test_config_parse_multiple() {
        let config: TestConfig = syn::parse_str(
            "timeout_ms = 250, temp_prefix = \"build-\", flavor = \"current_thread\"",
        )
        .unwrap();
        assert_eq!(config.timeout_ms, Some(250));
        assert_eq!(config.temp_prefix, Some("build-".to_string()));
        assert_eq!(config.flavor, Some("current_thread".to_string()));
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_unknown_key() {
        assert!(syn::parse_str::<TestConfig>("runtime = \"smol\"").is_err());
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_bad_flavor() {
        assert!(syn::parse_str::<TestConfig>("flavor = \"single\"").is_err());
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_wrong_literal_kind() {
        assert!(syn::parse_str::<TestConfig>("timeout_ms = \"fast\"").is_err());
    }
}
