use std::collections::HashSet;

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};

/// Actions in the order they are preferred when expectations tie.
const ACTIONS: [&str; 4] = ["stand", "hit", "double", "split"];

/// Derives `ActionExpectation` for a struct of named `f64` fields.
///
/// Every field must be named after an action (`stand`, `hit`, `double` or
/// `split`). Actions without a field read as negative infinity and panic when
/// set. The generated `Default` starts every field at negative infinity, so an
/// action that has not been evaluated yet never wins.
#[proc_macro_derive(ActionExpectation)]
pub fn action_expectation_derive(input: TokenStream1) -> TokenStream1 {
    let ast: syn::DeriveInput = syn::parse(input).unwrap();
    let struct_name = &ast.ident;
    let data_struct = match ast.data {
        syn::Data::Struct(x) => x,
        _ => panic!("ActionExpectation can only be derived for a struct"),
    };
    let named_fields = match data_struct.fields {
        syn::Fields::Named(x) => x,
        _ => panic!("No named fields"),
    };

    let mut field_name_set: HashSet<String> = HashSet::new();
    for field in &named_fields.named {
        let field_name = field.ident.as_ref().unwrap().to_string();
        if !ACTIONS.contains(&field_name.as_str()) {
            panic!("Field `{}` is not an action", field_name);
        }
        field_name_set.insert(field_name);
    }

    let accessors: Vec<TokenStream2> = ACTIONS
        .iter()
        .map(|action| generate_getter_setter(action, field_name_set.contains(*action)))
        .collect();
    let default_fields: Vec<TokenStream2> = ACTIONS
        .iter()
        .filter(|action| field_name_set.contains(**action))
        .map(|action| {
            let field = format_ident!("{}", action);
            quote! { #field: -f64::INFINITY }
        })
        .collect();

    let ts2 = quote! {
        impl ActionExpectation for #struct_name {
            #(#accessors)*
        }

        impl Default for #struct_name {
            fn default() -> Self {
                Self {
                    #(#default_fields),*
                }
            }
        }
    };
    ts2.into()
}

fn generate_getter_setter(action: &str, is_valid: bool) -> TokenStream2 {
    let getter_name = format_ident!("{}", action);
    let setter_name = format_ident!("set_{}", action);
    if is_valid {
        quote! {
            fn #getter_name(&self) -> f64 {
                self.#getter_name
            }
            fn #setter_name(&mut self, val: f64) {
                self.#getter_name = val;
            }
        }
    } else {
        let err_msg = format!("Cannot set expectation of {}", action);
        quote! {
            fn #getter_name(&self) -> f64 {
                -f64::INFINITY
            }
            fn #setter_name(&mut self, _val: f64) {
                panic!("{}", #err_msg);
            }
        }
    }
}
