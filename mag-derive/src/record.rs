//! Implementation of the `#[derive(Record)]` macro.

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, FieldsNamed, Ident, Type, Visibility, parse_quote};

use crate::naming::to_pascal_case;

struct RecordField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    vis: &'a Visibility,
    variant: Ident,
}

/// Expands the derive, or produces a `compile_error!` for unsupported input.
pub fn expand(input: &DeriveInput) -> TokenStream2 {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named) => expand_named(input, named),
            Fields::Unnamed(_) => syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs with named fields, not tuple structs.",
            )
            .to_compile_error(),
            Fields::Unit => syn::Error::new_spanned(
                &input.ident,
                "Record cannot be derived for unit structs (structs with no fields).",
            )
            .to_compile_error(),
        },
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs, not enums. Use #[derive(Choice)] for enums.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Record cannot be derived for unions.")
                .to_compile_error()
        }
    }
}

fn expand_named(input: &DeriveInput, named: &FieldsNamed) -> TokenStream2 {
    let name = &input.ident;
    let vis = &input.vis;
    let field_enum = format_ident!("{}Field", name);
    let partial = format_ident!("{}Partial", name);

    let fields: Vec<RecordField<'_>> = named
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            Some(RecordField {
                ident,
                ty: &field.ty,
                vis: &field.vis,
                variant: format_ident!("{}", to_pascal_case(&ident.unraw().to_string())),
            })
        })
        .collect();

    let idents: Vec<&Ident> = fields.iter().map(|field| field.ident).collect();
    let types: Vec<&Type> = fields.iter().map(|field| field.ty).collect();
    let visibilities: Vec<&Visibility> = fields.iter().map(|field| field.vis).collect();
    let variants: Vec<&Ident> = fields.iter().map(|field| &field.variant).collect();

    let generics = &input.generics;
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    let mut record_generics = generics.clone();
    {
        let predicates = &mut record_generics.make_where_clause().predicates;
        for parameter in generics.type_params() {
            let parameter = &parameter.ident;
            predicates.push(parse_quote!(#parameter: ::core::clone::Clone));
        }
        for ty in &types {
            predicates.push(parse_quote!(#ty: ::core::clone::Clone));
        }
    }
    let (_, _, record_where_clause) = record_generics.split_for_impl();

    let field_enum_doc = format!("Names the fields of [`{name}`].");
    let partial_doc = format!("[`{name}`] with every field optional.");
    let optic_methods = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let method = format_ident!("{}_optic", ident.unraw());
        let doc = format!("Returns an optic focusing on the `{}` field.", ident.unraw());
        quote! {
            #[doc = #doc]
            #[inline]
            #[must_use]
            pub fn #method() -> impl ::mag::optics::Optic<Self, #ty> + ::core::clone::Clone
            where
                #ty: ::core::clone::Clone,
            {
                ::mag::optics::FieldOptic::new(
                    |source: &Self| &source.#ident,
                    |mut source: Self, value: #ty| {
                        source.#ident = value;
                        source
                    },
                )
            }
        }
    });

    quote! {
        #[doc = #field_enum_doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #vis enum #field_enum {
            #(
                #[allow(missing_docs)]
                #variants,
            )*
        }

        #[doc = #partial_doc]
        #[derive(Clone, Debug, PartialEq)]
        #vis struct #partial #generics #where_clause {
            #(
                #[allow(missing_docs)]
                #visibilities #idents: ::core::option::Option<#types>,
            )*
        }

        impl #impl_generics ::core::default::Default for #partial #type_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#idents: ::core::option::Option::None,)*
                }
            }
        }

        impl #impl_generics #name #type_generics #where_clause {
            #(#optic_methods)*
        }

        impl #impl_generics ::mag::optics::Record for #name #type_generics #record_where_clause {
            type Field = #field_enum;
            type Partial = #partial #type_generics;

            const FIELDS: &'static [#field_enum] = &[#(#field_enum::#variants),*];

            fn select(&self, fields: &[#field_enum]) -> Self::Partial {
                #partial {
                    #(
                        #idents: if fields.contains(&#field_enum::#variants) {
                            ::core::option::Option::Some(::core::clone::Clone::clone(&self.#idents))
                        } else {
                            ::core::option::Option::None
                        },
                    )*
                }
            }

            fn merge(self, edited: Self::Partial) -> Self {
                Self {
                    #(
                        #idents: match edited.#idents {
                            ::core::option::Option::Some(value) => value,
                            ::core::option::Option::None => self.#idents,
                        },
                    )*
                }
            }

            fn into_partial(self) -> Self::Partial {
                #partial {
                    #(#idents: ::core::option::Option::Some(self.#idents),)*
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn expand_str(input: DeriveInput) -> String {
        expand(&input).to_string()
    }

    #[rstest]
    fn generates_field_enum_partial_and_optics() {
        let output = expand_str(parse_quote! {
            pub struct Person {
                pub first_name: String,
                age: u32,
            }
        });

        assert!(output.contains("enum PersonField"));
        assert!(output.contains("FirstName"));
        assert!(output.contains("struct PersonPartial"));
        assert!(output.contains("fn first_name_optic"));
        assert!(output.contains("fn age_optic"));
        assert!(output.contains(":: mag :: optics :: Record for Person"));
    }

    #[rstest]
    fn raw_identifiers_are_unrawed_in_generated_names() {
        let output = expand_str(parse_quote! {
            struct Token {
                r#type: String,
            }
        });

        assert!(output.contains("fn type_optic"));
        assert!(output.contains("Type"));
    }

    #[rstest]
    #[case::enumeration(parse_quote! { enum Shape { Circle(f64) } }, "not enums")]
    #[case::tuple_struct(parse_quote! { struct Pair(i32, i32); }, "not tuple structs")]
    #[case::unit_struct(parse_quote! { struct Marker; }, "unit structs")]
    #[case::union(parse_quote! { union Bits { a: u32, b: f32 } }, "unions")]
    fn rejects_unsupported_input(#[case] input: DeriveInput, #[case] message: &str) {
        let output = expand_str(input);
        assert!(output.contains("compile_error"));
        assert!(output.contains(message));
    }
}
