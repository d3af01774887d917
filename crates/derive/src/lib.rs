//! Derive macro for `confcheck::Properties`.

use proc_macro::TokenStream;
use quote::quote;
use std::collections::BTreeSet;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, LitStr, PathArguments,
    Type,
};

/// Type tags accepted in `#[property(kind = "...")]`, canonical names first.
const KNOWN_KINDS: &[&str] = &[
    "bool", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64", "float64",
    "string", "sbyte", "byte", "short", "ushort", "int", "uint", "long", "ulong", "double",
];

/// Derive `confcheck::Properties` from `#[property(...)]` field attributes.
#[proc_macro_derive(Properties, attributes(property, properties))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_properties(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_properties(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let self_validate = parse_container(&input.attrs)?;
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Properties can only be derived for structs",
        ));
    };

    let fields = match &struct_data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &struct_data.fields,
                "Properties requires named fields",
            ));
        },
    };

    let mut registrations = Vec::new();
    let mut names = BTreeSet::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let Some(property) = parse_field(field, ident)? else {
            continue;
        };
        if let Property::Leaf(leaf) = &property {
            if !names.insert(leaf.name.value()) {
                return Err(syn::Error::new_spanned(
                    &leaf.name,
                    "duplicate property name on this struct",
                ));
            }
        }
        registrations.push((ident, property));
    }

    let descriptors = expand_descriptors(&registrations);
    let slot = expand_slot(&registrations, false);
    let slot_mut = expand_slot(&registrations, true);
    let self_validation = self_validate.then(|| {
        quote! {
            fn self_validation(&self) -> ::core::option::Option<&dyn ::confcheck::SelfValidate> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::confcheck::Properties for #name #ty_generics #where_clause {
            fn descriptors() -> ::std::vec::Vec<::confcheck::FieldDescriptor> {
                #descriptors
            }

            fn slot(&self, name: &str) -> ::core::option::Option<::confcheck::Slot<'_>> {
                #slot
            }

            fn slot_mut(&mut self, name: &str) -> ::core::option::Option<::confcheck::SlotMut<'_>> {
                #slot_mut
            }

            #self_validation
        }
    })
}

/// One `#[property(...)]` annotated field.
enum Property {
    Leaf(Leaf),
    Flatten(Type),
}

struct Leaf {
    name: LitStr,
    kind: LitStr,
    required: bool,
    parent: Option<LitStr>,
    default: Option<LitStr>,
}

fn parse_container(attrs: &[Attribute]) -> Result<bool, syn::Error> {
    let mut self_validate = false;
    for attr in attrs {
        if !attr.path().is_ident("properties") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("self_validate") {
                if self_validate {
                    return Err(meta.error("duplicate properties(self_validate)"));
                }
                self_validate = true;
                return Ok(());
            }
            Err(meta.error("unsupported properties attribute on container"))
        })?;
    }
    Ok(self_validate)
}

fn parse_field(field: &Field, ident: &Ident) -> Result<Option<Property>, syn::Error> {
    let mut seen = false;
    let mut flatten = false;
    let mut name: Option<LitStr> = None;
    let mut kind: Option<LitStr> = None;
    let mut required = false;
    let mut parent: Option<LitStr> = None;
    let mut default: Option<LitStr> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        if seen {
            return Err(syn::Error::new_spanned(
                attr,
                "only one #[property(...)] attribute is allowed per field",
            ));
        }
        seen = true;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flatten") {
                flatten = true;
                return Ok(());
            }
            if meta.path.is_ident("required") {
                required = true;
                return Ok(());
            }
            if meta.path.is_ident("kind") {
                let value: LitStr = meta.value()?.parse()?;
                if !is_known_kind(&value.value()) {
                    return Err(syn::Error::new_spanned(
                        &value,
                        format!(
                            "unknown property kind; expected one of: {}",
                            KNOWN_KINDS.join(", ")
                        ),
                    ));
                }
                return set_once(&mut kind, value, &meta, "kind");
            }
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                return set_once(&mut name, value, &meta, "name");
            }
            if meta.path.is_ident("parent") {
                let value: LitStr = meta.value()?.parse()?;
                return set_once(&mut parent, value, &meta, "parent");
            }
            if meta.path.is_ident("default") {
                let value: LitStr = meta.value()?.parse()?;
                return set_once(&mut default, value, &meta, "default");
            }
            Err(meta.error("unsupported property attribute on field"))
        })?;
    }

    if !seen {
        return Ok(None);
    }
    if flatten {
        if required || name.is_some() || kind.is_some() || parent.is_some() || default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "property(flatten) cannot be combined with other keys",
            ));
        }
        return Ok(Some(Property::Flatten(field.ty.clone())));
    }

    let Some(kind) = kind else {
        return Err(syn::Error::new_spanned(
            field,
            "missing property(kind = \"...\")",
        ));
    };
    if option_inner(&field.ty).is_none() {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "property fields must be Option<T>",
        ));
    }
    let name = name.unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
    Ok(Some(Property::Leaf(Leaf {
        name,
        kind,
        required,
        parent,
        default,
    })))
}

fn set_once(
    slot: &mut Option<LitStr>,
    value: LitStr,
    meta: &syn::meta::ParseNestedMeta<'_>,
    key: &str,
) -> Result<(), syn::Error> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate property({key} = ...)")));
    }
    *slot = Some(value);
    Ok(())
}

fn is_known_kind(kind: &str) -> bool {
    let kind = kind.trim().to_ascii_lowercase();
    KNOWN_KINDS.contains(&kind.as_str())
}

fn expand_descriptors(registrations: &[(&Ident, Property)]) -> proc_macro2::TokenStream {
    if registrations.is_empty() {
        return quote! { ::std::vec::Vec::new() };
    }
    let steps = registrations.iter().map(|(_, property)| match property {
        Property::Leaf(leaf) => {
            let Leaf {
                name,
                kind,
                required,
                parent,
                default,
            } = leaf;
            let parent = parent.as_ref().map(|parent| quote! { .with_parent(#parent) });
            let default = default
                .as_ref()
                .map(|default| quote! { .with_default(#default) });
            quote! {
                descriptors.push(
                    ::confcheck::FieldDescriptor::new(#name, #kind)
                        .with_required(#required)
                        #parent
                        #default
                );
            }
        },
        Property::Flatten(ty) => quote! {
            descriptors.extend(<#ty as ::confcheck::Properties>::descriptors());
        },
    });
    quote! {
        let mut descriptors = ::std::vec::Vec::new();
        #(#steps)*
        descriptors
    }
}

fn expand_slot(registrations: &[(&Ident, Property)], mutable: bool) -> proc_macro2::TokenStream {
    let (slot_ty, accessor, borrow) = if mutable {
        (
            quote! { ::confcheck::SlotMut },
            quote! { slot_mut },
            quote! { &mut },
        )
    } else {
        (quote! { ::confcheck::Slot }, quote! { slot }, quote! { & })
    };

    let mut arms = Vec::new();
    let mut nested = Vec::new();
    for (ident, property) in registrations {
        match property {
            Property::Leaf(leaf) => {
                let name = &leaf.name;
                arms.push(quote! {
                    #name => return ::core::option::Option::Some(#slot_ty::from(#borrow self.#ident)),
                });
            },
            Property::Flatten(_) => nested.push(quote! {
                if let ::core::option::Option::Some(slot) =
                    ::confcheck::Properties::#accessor(#borrow self.#ident, name)
                {
                    return ::core::option::Option::Some(slot);
                }
            }),
        }
    }

    let lookup = if arms.is_empty() {
        None
    } else {
        Some(quote! {
            match name {
                #(#arms)*
                _ => {},
            }
        })
    };
    let unused = (arms.is_empty() && nested.is_empty()).then(|| quote! { let _ = name; });
    quote! {
        #unused
        #lookup
        #(#nested)*
        ::core::option::Option::None
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}
