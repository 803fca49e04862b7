use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    ReadWrite,
    ReadOnly,
    Skip,
}

fn field_access(field: &syn::Field) -> Result<Access, syn::Error> {
    let mut access = Access::ReadWrite;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("readonly") {
                access = Access::ReadOnly;
                Ok(())
            } else if meta.path.is_ident("skip") {
                access = Access::Skip;
                Ok(())
            } else {
                Err(meta.error("expected `readonly` or `skip`"))
            }
        })?;
    }

    Ok(access)
}

fn const_name(ident: &Ident) -> Ident {
    let raw = ident.to_string();
    let name = raw.strip_prefix("r#").unwrap_or(&raw).to_uppercase();
    format_ident!("{}", name, span = ident.span())
}

fn field_name(ident: &Ident) -> String {
    let raw = ident.to_string();
    raw.strip_prefix("r#").map_or_else(|| raw.clone(), str::to_owned)
}

/// Expands `#[derive(ModelFields)]`.
pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return syn::Error::new_spanned(
                    name,
                    "ModelFields only supports structs with named fields",
                )
                .to_compile_error();
            },
        },
        _ => {
            return syn::Error::new_spanned(name, "ModelFields only supports structs")
                .to_compile_error();
        },
    };

    let mut consts = Vec::new();
    for field in fields {
        let access = match field_access(field) {
            Ok(access) => access,
            Err(err) => return err.to_compile_error(),
        };
        let Some(ident) = field.ident.as_ref() else { continue };
        let vis = &field.vis;
        let ty = &field.ty;
        let konst = const_name(ident);
        let label = field_name(ident);

        let tokens = match access {
            Access::Skip => continue,
            Access::ReadOnly => quote! {
                #vis const #konst: ::kmodel::Field<Self, #ty> = ::kmodel::Field::new(
                    #label,
                    |this: &Self| ::core::clone::Clone::clone(&this.#ident),
                );
            },
            Access::ReadWrite => quote! {
                #vis const #konst: ::kmodel::MutableField<Self, #ty> = ::kmodel::MutableField::new(
                    #label,
                    |this: &Self| ::core::clone::Clone::clone(&this.#ident),
                    |this: &mut Self, value: #ty| this.#ident = value,
                );
            },
        };
        consts.push(tokens);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #[automatically_derived]
        #[allow(dead_code)]
        impl #impl_generics #name #ty_generics #where_clause {
            #(#consts)*
        }
    }
}
