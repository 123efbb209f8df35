use darling::{ast, util, Error, FromDeriveInput, FromField, FromMeta};
use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, parse_quote, DeriveInput, Token};

#[proc_macro_derive(Encode, attributes(rawbin))]
pub fn derive_encode(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ContainerReceiver::from_derive_input(&input)
        .and_then(|receiver| receiver.validate())
        .map(|data| data.encode_impl().into_token_stream())
        .unwrap_or_else(|error| error.write_errors())
        .into()
}

#[proc_macro_derive(Decode, attributes(rawbin))]
pub fn derive_decode(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ContainerReceiver::from_derive_input(&input)
        .and_then(|receiver| receiver.validate())
        .map(|data| data.decode_impl().into_token_stream())
        .unwrap_or_else(|error| error.write_errors())
        .into()
}

#[derive(FromDeriveInput)]
#[darling(attributes(rawbin), supports(struct_any))]
struct ContainerReceiver {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<util::Ignored, FieldReceiver>,

    #[darling(default)]
    crate_path: Option<syn::Path>,

    #[darling(default)]
    ctx: Asym<syn::LitStr>,
}

struct ContainerData {
    ident: syn::Ident,
    generics: syn::Generics,
    crate_path: syn::Path,
    encode_ctx_pat: TokenStream,
    decode_ctx_pat: TokenStream,
    encode_ctx_type: TokenStream,
    decode_ctx_type: TokenStream,
    style: ast::Style,
    fields: Vec<FieldData>,
}

impl ContainerReceiver {
    fn validate(&self) -> Result<ContainerData, Error> {
        let mut errors = Vec::new();

        let ident = self.ident.clone();
        let generics = self.generics.clone();
        let crate_path = self
            .crate_path
            .clone()
            .unwrap_or_else(|| parse_quote!(rawbin));

        let mut parse_ctx = |arg: Option<&syn::LitStr>| match arg {
            None => (quote!(_), quote!(())),
            Some(lit) => {
                let parts: Punctuated<syn::FnArg, Token![,]> =
                    match lit.parse_with(Punctuated::parse_terminated) {
                        Ok(punct) => punct,
                        Err(error) => {
                            errors.push(from_syn_error(error, lit));
                            Punctuated::new()
                        }
                    };

                let parts: Vec<_> = parts
                    .into_iter()
                    .flat_map(|fn_arg| match fn_arg {
                        syn::FnArg::Typed(pat_type) => Some((pat_type.pat, pat_type.ty)),
                        _ => {
                            errors.push(
                                Error::custom("expected name and type, like `len: usize`")
                                    .with_span(&fn_arg),
                            );
                            None
                        }
                    })
                    .collect();

                let pats = parts.iter().map(|(pat, _)| pat);
                let types = parts.iter().map(|(_, ty)| ty);

                // A single context variable is passed bare, not as a 1-tuple.
                if parts.len() == 1 {
                    (quote!( #( #pats )* ), quote!( #( #types )* ))
                } else {
                    (quote!( ( #( #pats , )* ) ), quote!( ( #( #types , )* ) ))
                }
            }
        };

        let (encode_ctx_pat, encode_ctx_type) = parse_ctx(self.ctx.encode());
        let (decode_ctx_pat, decode_ctx_type) = parse_ctx(self.ctx.decode());

        let (style, fields) = match &self.data {
            ast::Data::Struct(fields) => {
                let style = fields.style;
                let fields = fields
                    .iter()
                    .enumerate()
                    .flat_map(|(index, field)| match field.validate(&crate_path, index) {
                        Ok(field) => Some(field),
                        Err(error) => {
                            errors.push(error);
                            None
                        }
                    })
                    .collect();
                (style, fields)
            }
            ast::Data::Enum(_) => {
                errors.push(Error::unsupported_shape("enum"));
                (ast::Style::Unit, Vec::new())
            }
        };

        if errors.is_empty() {
            Ok(ContainerData {
                ident,
                generics,
                crate_path,
                encode_ctx_pat,
                decode_ctx_pat,
                encode_ctx_type,
                decode_ctx_type,
                style,
                fields,
            })
        } else {
            Err(Error::multiple(errors))
        }
    }
}

impl ContainerData {
    fn encode_impl(&self) -> TokenStream {
        let Self {
            ident,
            crate_path,
            encode_ctx_pat,
            encode_ctx_type,
            ..
        } = self;
        let (impl_generics, ident_generics, where_clause) = self.generics.split_for_impl();
        let buf_binding = quote!(__rawbin_buf);

        let field_pat = self.fields.iter().map(|field| {
            let FieldData {
                stored_ident,
                public_ref_ident,
                ..
            } = field;
            match stored_ident {
                Some(stored_ident) => quote!(#stored_ident: #public_ref_ident),
                None => quote!(#public_ref_ident),
            }
        });
        let pat_fields = match self.style {
            ast::Style::Tuple => quote!( ( #( #field_pat, )* ) ),
            ast::Style::Struct => quote!( { #( #field_pat, )* } ),
            ast::Style::Unit => quote!(),
        };

        let field_encode_stmt = self
            .fields
            .iter()
            .map(|field| field.encode_stmt(&buf_binding));

        quote! {
            #[allow(non_shorthand_field_patterns)]
            impl #impl_generics #crate_path::Encode<#encode_ctx_type> for #ident #ident_generics
                #where_clause
            {
                fn encode(
                    &self,
                    #encode_ctx_pat: #encode_ctx_type,
                    #buf_binding: &mut #crate_path::ByteBuffer,
                ) -> ::core::result::Result<(), #crate_path::Error> {
                    match self {
                        Self #pat_fields => {
                            #( #field_encode_stmt )*
                            ::core::result::Result::Ok(())
                        }
                    }
                }
            }
        }
    }

    fn decode_impl(&self) -> TokenStream {
        let Self {
            ident,
            crate_path,
            decode_ctx_pat,
            decode_ctx_type,
            ..
        } = self;
        let (impl_generics, ident_generics, where_clause) = self.generics.split_for_impl();
        let reader_binding = quote!(__rawbin_reader);

        let private_owned_ident = self.fields.iter().map(|field| &field.private_owned_ident);
        let public_ref_ident = self.fields.iter().map(|field| &field.public_ref_ident);
        let field_decode_expr = self
            .fields
            .iter()
            .map(|field| field.decode_expr(&reader_binding));

        let field_cons = self.fields.iter().map(|field| {
            let FieldData {
                stored_ident,
                private_owned_ident,
                ..
            } = field;
            match stored_ident {
                Some(stored_ident) => quote!(#stored_ident: #private_owned_ident),
                None => quote!(#private_owned_ident),
            }
        });
        let cons_fields = match self.style {
            ast::Style::Tuple => quote!( ( #( #field_cons, )* ) ),
            ast::Style::Struct => quote!( { #( #field_cons, )* } ),
            ast::Style::Unit => quote!(),
        };

        quote! {
            impl #impl_generics #crate_path::Decode<#decode_ctx_type> for #ident #ident_generics
                #where_clause
            {
                fn decode(
                    #decode_ctx_pat: #decode_ctx_type,
                    #reader_binding: &mut #crate_path::Reader<'_>,
                ) -> ::core::result::Result<Self, #crate_path::Error> {
                    #(
                        let #private_owned_ident = #field_decode_expr;
                        #[allow(unused_variables)]
                        let #public_ref_ident = &#private_owned_ident;
                    )*
                    ::core::result::Result::Ok(Self #cons_fields)
                }
            }
        }
    }
}

#[derive(FromField)]
#[darling(attributes(rawbin))]
struct FieldReceiver {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    #[darling(default)]
    ctx: Asym<syn::LitStr>,

    #[darling(default)]
    count: Option<syn::LitStr>,

    #[darling(default)]
    with: Option<syn::Path>,

    #[darling(default)]
    encode_with: Option<syn::Path>,

    #[darling(default)]
    decode_with: Option<syn::Path>,

    #[darling(default)]
    skip_if: Option<syn::LitStr>,

    #[darling(default)]
    pad: Option<usize>,
}

struct FieldData {
    stored_ident: Option<syn::Ident>,
    public_ref_ident: syn::Ident,
    private_owned_ident: syn::Ident,
    encode_ctx: TokenStream,
    decode_ctx: TokenStream,
    encoder: TokenStream,
    decoder: TokenStream,
    skip_if: Option<TokenStream>,
    pad: Option<usize>,
}

impl FieldReceiver {
    fn validate(&self, crate_path: &syn::Path, index: usize) -> Result<FieldData, Error> {
        let Self { ty, .. } = self;
        let mut errors = Vec::new();

        let stored_ident = self.ident.clone();
        let public_ref_ident = match &self.ident {
            Some(ident) => ident.clone(),
            None => format_ident!("field_{}", index),
        };
        let private_owned_ident = format_ident!("__rawbin_owned_{}", public_ref_ident);

        let mut parse_expr = |lit: &syn::LitStr| match lit.parse::<syn::Expr>() {
            Ok(expr) => expr.into_token_stream(),
            Err(err) => {
                errors.push(from_syn_error(err, lit));
                quote!(unreachable!("compile error"))
            }
        };

        let encode_ctx = match self.ctx.encode() {
            Some(lit) => parse_expr(lit),
            None => quote!(()),
        };

        let skip_if = self.skip_if.as_ref().map(|lit| parse_expr(lit));

        let mut count_conflict = false;
        let decode_ctx = match (self.ctx.decode(), &self.count) {
            (Some(lit), None) => parse_expr(lit),
            (None, Some(lit)) => {
                let count = parse_expr(lit);
                quote! {
                    <#crate_path::ctx::Len as ::core::convert::TryFrom<_>>::try_from(#count)?
                }
            }
            (None, None) => quote!(()),
            (Some(..), Some(..)) => {
                count_conflict = true;
                quote!(())
            }
        };
        if count_conflict {
            errors.push(Error::custom(
                "`count` and a decode `ctx` are incompatible with each other",
            ));
        }

        let encoder = match (&self.encode_with, &self.with) {
            (None, None) => quote!(<#ty as #crate_path::Encode<_>>::encode),
            (Some(encode_with), None) => quote!(#encode_with),
            (None, Some(with)) => quote!(#with::encode),
            _ => {
                errors.push(Error::custom(
                    "`encode_with` and `with` are incompatible with each other",
                ));
                quote!(__compile_error_throwaway)
            }
        };

        let decoder = match (&self.decode_with, &self.with) {
            (None, None) => quote!(<#ty as #crate_path::Decode<_>>::decode),
            (Some(decode_with), None) => quote!(#decode_with),
            (None, Some(with)) => quote!(#with::decode),
            _ => {
                errors.push(Error::custom(
                    "`decode_with` and `with` are incompatible with each other",
                ));
                quote!(__compile_error_throwaway)
            }
        };

        if errors.is_empty() {
            Ok(FieldData {
                stored_ident,
                public_ref_ident,
                private_owned_ident,
                encode_ctx,
                decode_ctx,
                encoder,
                decoder,
                skip_if,
                pad: self.pad,
            })
        } else {
            Err(Error::multiple(errors))
        }
    }
}

impl FieldData {
    fn encode_stmt(&self, buf_binding: &TokenStream) -> TokenStream {
        let Self {
            public_ref_ident,
            encoder,
            encode_ctx,
            ..
        } = self;
        let pad_stmt = self.pad.map(|pad| quote!(#buf_binding.pad(#pad);));
        let raw_encoder = quote! {
            #encoder(#public_ref_ident, #encode_ctx, #buf_binding)?;
            #pad_stmt
        };
        match &self.skip_if {
            Some(skip_if) => quote! {
                if !(#skip_if) {
                    #raw_encoder
                }
            },
            None => raw_encoder,
        }
    }

    fn decode_expr(&self, reader_binding: &TokenStream) -> TokenStream {
        let Self {
            decode_ctx,
            decoder,
            ..
        } = self;
        let pad_stmt = self.pad.map(|pad| quote!(#reader_binding.skip(#pad)?;));
        let raw_decoder = quote! {
            {
                let __rawbin_value = #decoder(#decode_ctx, #reader_binding)?;
                #pad_stmt
                __rawbin_value
            }
        };
        match &self.skip_if {
            Some(skip_if) => quote! {
                if #skip_if {
                    ::core::default::Default::default()
                } else {
                    #raw_decoder
                }
            },
            None => raw_decoder,
        }
    }
}

enum Asym<T> {
    Single(T),
    Multi {
        encode: Option<T>,
        decode: Option<T>,
    },
}

impl<T> Asym<T> {
    fn encode(&self) -> Option<&T> {
        match self {
            Self::Single(val) => Some(val),
            Self::Multi { encode, .. } => encode.as_ref(),
        }
    }

    fn decode(&self) -> Option<&T> {
        match self {
            Self::Single(val) => Some(val),
            Self::Multi { decode, .. } => decode.as_ref(),
        }
    }
}

impl<T> FromMeta for Asym<T>
where
    T: FromMeta,
{
    fn from_meta(item: &syn::Meta) -> Result<Self, Error> {
        match item {
            syn::Meta::List(value) => {
                Self::from_list(&value.nested.iter().cloned().collect::<Vec<_>>())
            }
            _ => T::from_meta(item).map(Self::Single),
        }
    }

    fn from_list(items: &[syn::NestedMeta]) -> Result<Self, Error> {
        let mut encode = None;
        let mut decode = None;

        let encode_path: syn::Path = parse_quote!(encode);
        let decode_path: syn::Path = parse_quote!(decode);

        for item in items {
            match item {
                syn::NestedMeta::Meta(meta) => match meta.path() {
                    path if *path == encode_path => {
                        if encode.is_none() {
                            encode = Some(T::from_meta(meta)?);
                        } else {
                            return Err(Error::duplicate_field_path(path));
                        }
                    }
                    path if *path == decode_path => {
                        if decode.is_none() {
                            decode = Some(T::from_meta(meta)?);
                        } else {
                            return Err(Error::duplicate_field_path(path));
                        }
                    }
                    other => return Err(Error::unknown_field_path(other)),
                },
                syn::NestedMeta::Lit(..) => return Err(Error::unsupported_format("literal")),
            }
        }
        Ok(Self::Multi { encode, decode })
    }
}

impl<T> Default for Asym<T> {
    fn default() -> Self {
        Self::Multi {
            encode: None,
            decode: None,
        }
    }
}

fn from_syn_error(err: syn::Error, lit: &syn::LitStr) -> Error {
    Error::custom(&err).with_span(lit)
}
