// #[compilation_proxy] implementation
//
// Generates the symbolic identity / invokable pairs and the forwarding
// overrides for one compiler-interface trait.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::meta::ParseNestedMeta;
use syn::{FnArg, Ident, ItemTrait, Pat, Path, Result, ReturnType, TraitItem, TraitItemFn, Type, TypeParamBound};

use crate::types::{owned_operand, result_payload, simple_type_name};

/// Parsed `#[compilation_proxy(...)]` arguments.
#[derive(Default)]
pub struct ProxyArgs {
    receiver: Option<Ident>,
    proxies: Vec<Path>,
}

impl ProxyArgs {
    pub fn parse(&mut self, meta: ParseNestedMeta) -> Result<()> {
        if meta.path.is_ident("receiver") {
            self.receiver = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("proxies") {
            meta.parse_nested_meta(|inner| {
                self.proxies.push(inner.path.clone());
                Ok(())
            })
        } else {
            Err(meta.error("expected `receiver = <accessor>` or `proxies(<Proxy>, ...)`"))
        }
    }
}

/// One trait operation, with its typed parameters.
struct Operation<'a> {
    method: &'a TraitItemFn,
    params: Vec<(&'a Ident, &'a Type)>,
}

impl<'a> Operation<'a> {
    fn parse(method: &'a TraitItemFn) -> Result<Self> {
        let sig = &method.sig;
        let mut inputs = sig.inputs.iter();

        match inputs.next() {
            Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
            _ => {
                return Err(syn::Error::new_spanned(
                    sig,
                    "compiler-interface operations must take `&self`",
                ));
            }
        }

        if !sig.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &sig.generics,
                "compiler-interface operations cannot be generic",
            ));
        }

        let mut params = Vec::new();
        for arg in inputs {
            match arg {
                FnArg::Typed(pat_type) => {
                    if let Pat::Ident(pat_ident) = &*pat_type.pat {
                        params.push((&pat_ident.ident, &*pat_type.ty));
                    } else {
                        return Err(syn::Error::new_spanned(
                            arg,
                            "Only simple identifiers are supported as arguments",
                        ));
                    }
                }
                FnArg::Receiver(_) => {
                    return Err(syn::Error::new_spanned(arg, "unexpected second receiver"));
                }
            }
        }

        match &sig.output {
            ReturnType::Type(_, ty) if result_payload(ty).is_some() => {}
            _ => {
                return Err(syn::Error::new_spanned(
                    sig,
                    "compiler-interface operations must return `CiResult<T>`",
                ));
            }
        }

        Ok(Operation { method, params })
    }

    fn name(&self) -> &Ident {
        &self.method.sig.ident
    }

    fn is_proxied(&self) -> bool {
        self.method.default.is_none()
    }

    fn param_type_names(&self) -> Vec<String> {
        self.params.iter().map(|(_, ty)| simple_type_name(ty)).collect()
    }

    fn method_const(&self) -> Ident {
        format_ident!("{}_METHOD", self.name().to_string().to_uppercase())
    }

    fn invokable_const(&self) -> Ident {
        format_ident!("{}_INVOKABLE", self.name().to_string().to_uppercase())
    }

    /// `MethodSignature` entry for the interface descriptor.
    fn signature_entry(&self) -> TokenStream {
        let name = self.name().to_string();
        let params = self.param_type_names();
        let proxied = self.is_proxied();
        quote! {
            crate::proxy::MethodSignature {
                name: #name,
                params: &[#(#params),*],
                proxied: #proxied,
            }
        }
    }

    /// The `(SymbolicMethod, InvokableMethod)` constant pair.
    fn constants(&self, trait_label: &str, receiver: &Ident) -> TokenStream {
        let name = self.name();
        let name_str = name.to_string();
        let params = self.param_type_names();
        let arity = self.params.len();
        let method_const = self.method_const();
        let invokable_const = self.invokable_const();
        let method_doc = format!("Symbolic identity of `{}::{}`.", trait_label, name_str);
        let invokable_doc = format!("Performs `{}::{}` on a local receiver.", trait_label, name_str);

        let arg_names: Vec<Ident> = (0..arity).map(|i| format_ident!("arg{}", i)).collect();
        let extractions = self.params.iter().zip(arg_names.iter()).enumerate().map(|(i, ((_, ty), arg))| {
            let owned = owned_operand(ty);
            quote! {
                let #arg: #owned = crate::meta::FromValue::from_value(&args[#i])?;
            }
        });
        let call_args = self.params.iter().zip(arg_names.iter()).map(|((_, ty), arg)| {
            if matches!(ty, Type::Reference(_)) {
                quote!(&#arg)
            } else {
                quote!(#arg)
            }
        });

        quote! {
            #[doc = #method_doc]
            pub const #method_const: crate::proxy::SymbolicMethod =
                crate::proxy::SymbolicMethod::from_static(#name_str, &[#(#params),*]);

            #[doc = #invokable_doc]
            pub const #invokable_const: crate::proxy::InvokableMethod =
                crate::proxy::InvokableMethod::new(|receiver, args| {
                    let receiver = receiver
                        .#receiver()
                        .ok_or_else(|| crate::proxy::invokable::receiver_mismatch(#trait_label, receiver))?;
                    crate::proxy::invokable::check_arity(#name_str, args, #arity)?;
                    #(#extractions)*
                    let result = receiver.#name(#(#call_args),*)?;
                    Ok(crate::meta::ToValue::to_value(&result))
                });
        }
    }

    /// Forwarding override used inside `impl Trait for Proxy`.
    fn forwarding_override(&self, holder: &Ident) -> TokenStream {
        let sig = &self.method.sig;
        let method_const = self.method_const();
        let invokable_const = self.invokable_const();
        let packing = self.params.iter().map(|(ident, ty)| match ty {
            Type::Reference(reference) => {
                let elem = &reference.elem;
                quote!(<#elem as crate::meta::ToValue>::to_value(#ident))
            }
            other => quote!(<#other as crate::meta::ToValue>::to_value(&#ident)),
        });

        quote! {
            #sig {
                let args = ::std::vec![#(#packing),*];
                let result = crate::proxy::dispatch::handle(
                    self,
                    &#holder::#method_const,
                    #holder::#invokable_const.wrap_invocation_failures(),
                    args,
                )?;
                crate::meta::FromValue::from_value(&result)
            }
        }
    }
}

/// `&<Super>Methods::DESCRIPTOR` for every interface supertrait.
fn super_descriptors(item: &ItemTrait) -> Vec<TokenStream> {
    item.supertraits
        .iter()
        .filter_map(|bound| match bound {
            TypeParamBound::Trait(trait_bound) => Some(&trait_bound.path),
            _ => None,
        })
        .filter(|path| {
            path.segments
                .last()
                .map(|segment| !matches!(segment.ident.to_string().as_str(), "Send" | "Sync" | "Sized"))
                .unwrap_or(false)
        })
        .map(|path| {
            let mut holder = path.clone();
            if let Some(last) = holder.segments.last_mut() {
                last.ident = format_ident!("{}Methods", last.ident);
                last.arguments = syn::PathArguments::None;
            }
            quote!(&#holder::DESCRIPTOR)
        })
        .collect()
}

/// Expands the #[compilation_proxy] attribute macro.
///
/// Input: the interface trait
/// Output: the trait + `<Trait>Methods` holder + proxy impls
pub fn expand_trait(args: ProxyArgs, item: ItemTrait) -> Result<TokenStream> {
    let trait_name = &item.ident;
    let trait_label = trait_name.to_string();
    let receiver = args.receiver.ok_or_else(|| {
        syn::Error::new_spanned(trait_name, "#[compilation_proxy] requires `receiver = <accessor>`")
    })?;
    let holder = format_ident!("{}Methods", trait_name);
    let holder_doc = format!("Proxy table of [`{}`].", trait_label);

    let mut signatures = Vec::new();
    let mut symbols = Vec::new();
    let mut constants = Vec::new();
    let mut overrides = Vec::new();

    for entry in &item.items {
        let TraitItem::Fn(method) = entry else {
            continue;
        };
        let operation = Operation::parse(method)?;
        signatures.push(operation.signature_entry());
        if operation.is_proxied() {
            let method_const = operation.method_const();
            symbols.push(quote!(Self::#method_const));
            constants.push(operation.constants(&trait_label, &receiver));
            overrides.push(operation.forwarding_override(&holder));
        }
    }

    let supers = super_descriptors(&item);
    let impls = args.proxies.iter().map(|proxy| {
        quote! {
            impl #trait_name for #proxy {
                #(#overrides)*
            }
        }
    });

    Ok(quote! {
        #item

        #[doc = #holder_doc]
        pub struct #holder;

        impl #holder {
            /// Declared surface of the interface, including inherited interfaces.
            pub const DESCRIPTOR: crate::proxy::InterfaceDescriptor = crate::proxy::InterfaceDescriptor {
                name: #trait_label,
                methods: &[#(#signatures),*],
                supers: &[#(#supers),*],
                symbols: &[#(#symbols),*],
            };

            #(#constants)*
        }

        #(#impls)*
    })
}
