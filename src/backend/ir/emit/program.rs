//! Emit a full IR file to formatted Rust source.
//!
//! ## Notes
//!
//! - The output is formatted using `prettyplease` after parsing the generated tokens with `syn`.
//! - Every file starts with a generated-code header so tools and reviewers can skip it.

use proc_macro2::TokenStream;
use quote::quote;

use super::super::decl::IrFile;
use super::{EmitError, IrEmitter};

impl IrEmitter {
    /// Render one file: header, module docs, `use` declarations, then items in order.
    pub fn emit_file(&self, file: &IrFile) -> Result<String, EmitError> {
        let tokens = self.emit_file_tokens(file)?;
        let syntax_tree: syn::File = syn::parse2(tokens).map_err(|e| EmitError::SynParse(e.to_string()))?;
        let formatted = prettyplease::unparse(&syntax_tree);
        Ok(format!("{}\n\n{formatted}", self.header()))
    }

    /// The first line of every generated file.
    pub fn header(&self) -> String {
        format!("// Code generated by terragen v{}. DO NOT EDIT.", self.version)
    }

    pub fn emit_file_tokens(&self, file: &IrFile) -> Result<TokenStream, EmitError> {
        let docs = super::decls::doc_lines(&file.docs);
        let mut tokens = quote! { #(#![doc = #docs])* };
        for u in &file.uses {
            tokens.extend(self.emit_use(u)?);
        }
        for item in &file.items {
            tokens.extend(self.emit_item(item)?);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ir::{
        Derive, IrExpr, IrField, IrImpl, IrItem, IrMethod, IrStruct, IrType, IrUse, SerdeArg, Visibility,
    };
    use terragen_core::lang::runtime::RuntimeItemId;

    fn emitter() -> IrEmitter {
        IrEmitter::new().with_version("0.0.0")
    }

    #[test]
    fn test_module_file() {
        let file = IrFile {
            docs: vec!["Bindings.".to_string()],
            uses: vec![],
            items: vec![IrItem::Module("aws".to_string()), IrItem::Module("r#type".to_string())],
        };
        let out = emitter().emit_file(&file).unwrap();
        insta::assert_snapshot!(out, @r"
        // Code generated by terragen v0.0.0. DO NOT EDIT.

        //! Bindings.
        pub mod aws;
        pub mod r#type;
        ");
    }

    #[test]
    fn test_struct_with_serde_and_accessor() {
        let record = IrStruct {
            name: "InstanceArgs".to_string(),
            docs: vec!["Arguments.".to_string()],
            derives: vec![Derive::Debug, Derive::Serialize],
            serde: vec![SerdeArg::Crate("terra::serde".to_string())],
            fields: vec![
                IrField::new("ami", IrType::runtime(RuntimeItemId::StringValue))
                    .with_docs(vec!["Required.".to_string()])
                    .with_serde(vec![SerdeArg::Rename("ami".to_string())]),
            ],
            visibility: Visibility::Public,
        };
        let accessor = IrImpl {
            target: "InstanceArgs".to_string(),
            trait_id: None,
            methods: vec![IrMethod::getter(
                "ami",
                IrType::reference(IrType::runtime(RuntimeItemId::StringValue)),
                IrExpr::self_field("ami").borrow(),
            )],
        };
        let file = IrFile {
            docs: vec![],
            uses: vec![IrUse {
                path: vec!["crate".to_string(), "terra_gen".to_string(), "aws".to_string()],
            }],
            items: vec![IrItem::Struct(record), IrItem::Impl(accessor)],
        };
        let out = emitter().emit_file(&file).unwrap();
        insta::assert_snapshot!(out, @r#"
        // Code generated by terragen v0.0.0. DO NOT EDIT.

        use crate::terra_gen::aws;
        /// Arguments.
        #[derive(Debug, terra::serde::Serialize)]
        #[serde(crate = "terra::serde")]
        pub struct InstanceArgs {
            /// Required.
            #[serde(rename = "ami")]
            pub ami: terra::StringValue,
        }
        impl InstanceArgs {
            pub fn ami(&self) -> &terra::StringValue {
                &self.ami
            }
        }
        "#);
    }

    #[test]
    fn test_invalid_identifier_is_an_error() {
        let file = IrFile {
            docs: vec![],
            uses: vec![],
            items: vec![IrItem::Module("no-dash".to_string())],
        };
        assert_eq!(
            emitter().emit_file(&file),
            Err(EmitError::InvalidIdent("no-dash".to_string()))
        );
    }

    #[test]
    fn test_unescaped_keyword_fails_validation() {
        let file = IrFile {
            docs: vec![],
            uses: vec![],
            items: vec![IrItem::Module("type".to_string())],
        };
        assert!(matches!(emitter().emit_file(&file), Err(EmitError::SynParse(_))));
    }
}
