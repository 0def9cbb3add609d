// replaycomp-macros: proxy table generation for compiler-interface traits
//
// Provides one attribute macro:
// - #[compilation_proxy] - expands an interface trait into its proxy table
//
// Example:
// ```
// #[compilation_proxy(receiver = as_resolved_java_field, proxies(ResolvedJavaFieldProxy))]
// pub trait ResolvedJavaField: CompilerObject {
//     fn get_name(&self) -> CiResult<String>;
//     fn get_offset(&self) -> CiResult<i32>;
// }
// ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemTrait};

mod proxy;
mod types;

/// Turns a compiler-interface trait into a proxyable interface.
///
/// The trait itself is emitted unchanged. Next to it the macro generates:
/// - `<Trait>Methods`, a holder with one `<OP>_METHOD` symbolic identity and
///   one `<OP>_INVOKABLE` invokable per operation without a default body,
///   plus a `DESCRIPTOR` listing the whole declared surface
/// - `impl <Trait> for <Proxy>` for every proxy named in `proxies(...)`,
///   where each operation packs its arguments and routes through
///   `crate::proxy::dispatch::handle`
///
/// Arguments:
/// - `receiver = <ident>`: the `MetaObject` accessor that casts a receiver to
///   `&dyn Trait` inside the invokables
/// - `proxies(<Path>, ...)`: proxy structs implementing this trait
///
/// Operations with a default body are derived from other operations and are
/// listed in the descriptor as not proxied.
#[proc_macro_attribute]
pub fn compilation_proxy(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemTrait);
    let mut args = proxy::ProxyArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);

    proxy::expand_trait(args, input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
