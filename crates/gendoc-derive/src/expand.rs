use crate::attrs::{self, ContainerAttrs};
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse_quote, Data, DataEnum, DeriveInput, Fields, GenericParam, Generics, Ident};

pub fn expand(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let container = attrs::container_attrs(&input.attrs)?;

    let body = match &input.data {
        Data::Struct(data) => struct_body(&input.ident, &data.fields, &container)?,
        Data::Enum(data) => enum_body(&input.ident, data)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Describe cannot be derived for unions",
            ))
        }
    };

    add_bounds(&mut input.generics);
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::gendoc_core::Describe for #ident #ty_generics #where_clause {
            fn shape(&self) -> ::gendoc_core::Shape {
                #body
            }
        }
    })
}

fn struct_body(ident: &Ident, fields: &Fields, container: &ContainerAttrs) -> syn::Result<TokenStream> {
    match fields {
        Fields::Named(named) => {
            let type_name = ident.unraw().to_string();
            let metas = named
                .named
                .iter()
                .map(|field| field_meta(field, container))
                .collect::<syn::Result<Vec<_>>>()?;

            Ok(quote! {
                ::gendoc_core::Record::new(#type_name)
                    #(.field(#metas))*
                    .into_shape()
            })
        }
        // newtypes serialize as their inner value
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => Ok(quote! {
            ::gendoc_core::Describe::shape(&self.0)
        }),
        _ => Err(syn::Error::new_spanned(
            ident,
            "Describe can only be derived for structs with named fields or newtype structs",
        )),
    }
}

fn field_meta(field: &syn::Field, container: &ContainerAttrs) -> syn::Result<TokenStream> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let name = ident.unraw().to_string();
    let type_name = type_display(&field.ty.to_token_stream().to_string());
    let attrs = attrs::field_attrs(&field.attrs, &name, container.rename_all)?;

    let tags = attrs.tags.iter().map(|(key, value)| quote!(.tag(#key, #value)));
    let embedded = attrs.embedded.then(|| quote!(.embedded()));

    // hidden fields are never walked, so their type needs no Describe impl
    let shape = if attrs.is_skipped() {
        quote!(::gendoc_core::Shape::Primitive(::gendoc_core::Kind::Unit))
    } else {
        quote!(::gendoc_core::Describe::shape(&self.#ident))
    };

    Ok(quote! {
        ::gendoc_core::FieldMeta::new(#name, #type_name, #shape)
            #(#tags)*
            #embedded
    })
}

/// Unit-only enums serialize as their variant name
fn enum_body(ident: &Ident, data: &DataEnum) -> syn::Result<TokenStream> {
    if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        return Err(syn::Error::new_spanned(
            variant,
            format!(
                "Describe can only be derived for enums with unit variants, `{}::{}` has fields",
                ident, variant.ident
            ),
        ));
    }

    Ok(quote! {
        ::gendoc_core::Shape::Primitive(::gendoc_core::Kind::String)
    })
}

fn add_bounds(generics: &mut Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::gendoc_core::Describe));
        }
    }
}

/// Compact display form of a type's token string
///
/// `Option < Vec < String > >` becomes `Option<Vec<String>>`: spaces survive
/// only between two identifier characters, and `,`/`;` are followed by one.
fn type_display(raw: &str) -> String {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '\'';
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.get(i + 1).copied();
            if let (Some(prev), Some(next)) = (prev, next) {
                if is_ident(prev) && is_ident(next) {
                    out.push(' ');
                }
            }
            continue;
        }
        out.push(c);
        if c == ',' || c == ';' {
            out.push(' ');
        }
    }

    out.trim_end().to_string()
}
