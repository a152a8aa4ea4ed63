//! Implementation of the `#[derive(Choice)]` macro.

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, Index, Type, Variant};

use crate::naming::to_snake_case;

/// Everything needed to match, destructure and rebuild one variant.
///
/// Fields are always bound as `v0`, `v1`, ... regardless of their names.
struct VariantShape<'a> {
    ident: &'a Ident,
    snake: String,
    /// `Self::V`, `Self::V(v0, v1)` or `Self::V { a: v0, b: v1 }`.
    binding: TokenStream2,
    /// `Self::V`, `Self::V(..)` or `Self::V { .. }`.
    wildcard: TokenStream2,
    types: Vec<&'a Type>,
    bindings: Vec<Ident>,
}

impl VariantShape<'_> {
    fn payload_type(&self) -> TokenStream2 {
        let types = &self.types;
        match types.as_slice() {
            [] => quote! { () },
            [single] => quote! { #single },
            _ => quote! { (#(#types),*) },
        }
    }

    /// The payload as a value, from bindings made by value.
    fn payload_owned(&self) -> TokenStream2 {
        let bindings = &self.bindings;
        match bindings.as_slice() {
            [] => quote! { () },
            [single] => quote! { #single },
            _ => quote! { (#(#bindings),*) },
        }
    }

    /// The payload as a value, from bindings made by reference.
    fn payload_cloned(&self) -> TokenStream2 {
        let bindings = &self.bindings;
        match bindings.as_slice() {
            [] => quote! { () },
            [single] => quote! { ::core::clone::Clone::clone(#single) },
            _ => quote! { (#(::core::clone::Clone::clone(#bindings)),*) },
        }
    }

    /// A reference to the payload, from bindings made by reference.
    fn payload_ref(&self) -> TokenStream2 {
        let bindings = &self.bindings;
        match bindings.as_slice() {
            [] => quote! { &() },
            [single] => quote! { #single },
            _ => quote! { &(#(::core::clone::Clone::clone(#bindings)),*) },
        }
    }
}

/// Expands the derive, or produces a `compile_error!` for unsupported input.
pub fn expand(input: &DeriveInput) -> TokenStream2 {
    match &input.data {
        Data::Enum(data_enum) if data_enum.variants.is_empty() => syn::Error::new_spanned(
            &input.ident,
            "Choice cannot be derived for enums without variants.",
        )
        .to_compile_error(),
        Data::Enum(data_enum) => {
            let shapes: Vec<VariantShape<'_>> =
                data_enum.variants.iter().map(variant_shape).collect();
            expand_enum(input, &shapes)
        }
        Data::Struct(_) => syn::Error::new_spanned(
            &input.ident,
            "Choice can only be derived for enums, not structs. Use #[derive(Record)] for structs.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Choice cannot be derived for unions.")
                .to_compile_error()
        }
    }
}

fn variant_shape(variant: &Variant) -> VariantShape<'_> {
    let ident = &variant.ident;
    let types: Vec<&Type> = variant.fields.iter().map(|field| &field.ty).collect();
    let bindings: Vec<Ident> = (0..types.len())
        .map(|index| format_ident!("v{}", index))
        .collect();

    let (binding, wildcard) = match &variant.fields {
        Fields::Unit => (quote! { Self::#ident }, quote! { Self::#ident }),
        Fields::Unnamed(_) => (
            quote! { Self::#ident(#(#bindings),*) },
            quote! { Self::#ident(..) },
        ),
        Fields::Named(named) => {
            let names = named.named.iter().filter_map(|field| field.ident.as_ref());
            (
                quote! { Self::#ident { #(#names: #bindings),* } },
                quote! { Self::#ident { .. } },
            )
        }
    };

    VariantShape {
        ident,
        snake: to_snake_case(&ident.to_string()),
        binding,
        wildcard,
        types,
        bindings,
    }
}

fn expand_enum(input: &DeriveInput, shapes: &[VariantShape<'_>]) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let case_methods = shapes.iter().map(|shape| {
        let method = format_ident!("{}_case", shape.snake);
        let tag = shape.ident.to_string();
        let doc = format!("Returns the case recognising the `{tag}` variant.");
        let payload_type = shape.payload_type();
        let binding = &shape.binding;
        let cloned = shape.payload_cloned();
        let owned = shape.payload_owned();
        quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #method() -> ::mag::optics::Case<Self, #payload_type>
            where
                Self: 'static,
            {
                ::mag::optics::Case::new(
                    #tag,
                    |source: &Self| match source {
                        #binding => ::core::option::Option::Some(#cloned),
                        #[allow(unreachable_patterns)]
                        _ => ::core::option::Option::None,
                    },
                    |#owned: #payload_type| #binding,
                )
            }
        }
    });

    let handler_arguments: Vec<Ident> = shapes
        .iter()
        .map(|shape| format_ident!("on_{}", shape.snake))
        .collect();
    let handler_types: Vec<Ident> = (0..shapes.len())
        .map(|index| format_ident!("__H{}", index))
        .collect();
    let payload_types: Vec<TokenStream2> = shapes.iter().map(VariantShape::payload_type).collect();
    let indices: Vec<Index> = (0..shapes.len()).map(Index::from).collect();
    let bindings: Vec<&TokenStream2> = shapes.iter().map(|shape| &shape.binding).collect();
    let payload_refs: Vec<TokenStream2> = shapes.iter().map(VariantShape::payload_ref).collect();
    let payload_owned: Vec<TokenStream2> =
        shapes.iter().map(VariantShape::payload_owned).collect();

    let tags: Vec<String> = shapes.iter().map(|shape| shape.ident.to_string()).collect();
    let wildcards: Vec<&TokenStream2> = shapes.iter().map(|shape| &shape.wildcard).collect();

    quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#case_methods)*

            /// Dispatches on the active variant with one handler per variant,
            /// in declaration order.
            #[must_use]
            #[allow(clippy::too_many_arguments, clippy::type_complexity)]
            pub fn choice<__Target, #(#handler_types),*>(
                #(#handler_arguments: #handler_types),*
            ) -> impl ::mag::optics::Optic<Self, __Target> + ::core::clone::Clone
            where
                __Target: ::core::cmp::PartialEq,
                #(#handler_types: ::mag::optics::Optic<#payload_types, __Target> + ::core::clone::Clone,)*
            {
                let getters = (#(::core::clone::Clone::clone(&#handler_arguments),)*);
                let putters = (#(#handler_arguments,)*);
                ::mag::optics::FunctionOptic::new(
                    move |source: &Self| -> __Target {
                        match source {
                            #(#bindings => ::mag::optics::Optic::get(&getters.#indices, #payload_refs),)*
                        }
                    },
                    move |source: Self, target: __Target| -> Self {
                        match source {
                            #(
                                #bindings => {
                                    let #payload_owned =
                                        ::mag::optics::Optic::put(&putters.#indices, #payload_owned, target);
                                    #bindings
                                }
                            )*
                        }
                    },
                )
            }
        }

        impl #impl_generics ::mag::optics::Choice for #name #type_generics #where_clause {
            const TAGS: &'static [&'static str] = &[#(#tags),*];

            fn tag(&self) -> &'static str {
                match *self {
                    #(#wildcards => #tags,)*
                }
            }
        }
    }
}
