//! Primary records: the struct application code instantiates, plus its inherent and runtime trait impls.

use terragen_core::lang::runtime::RuntimeItemId;

use super::GraphLowering;
use crate::backend::entity::EntityKind;
use crate::backend::ir::{
    Callee, Derive, IrExpr, IrField, IrImpl, IrItem, IrMethod, IrStmt, IrStruct, IrType, Receiver, Visibility,
};

fn runtime(id: RuntimeItemId) -> IrType {
    IrType::runtime(id)
}

fn configuration_method() -> IrMethod {
    IrMethod::getter(
        "configuration",
        IrType::Result(
            Box::new(runtime(RuntimeItemId::Configuration)),
            Box::new(runtime(RuntimeItemId::ConfigurationError)),
        ),
        IrExpr::call(
            Callee::Runtime(RuntimeItemId::ConfigurationFn),
            vec![IrExpr::self_field("args").borrow()],
        ),
    )
}

fn str_getter(name: &str, value: IrExpr) -> IrMethod {
    IrMethod::getter(name, IrType::Str, value)
}

impl GraphLowering<'_> {
    pub(super) fn primary_items(&self) -> Vec<IrItem> {
        match self.entity.kind {
            EntityKind::Provider => self.provider_items(),
            EntityKind::Resource => self.resource_items(),
            EntityKind::DataSource => self.data_source_items(),
        }
    }

    fn record(&self, docs: Vec<String>, fields: Vec<IrField>) -> IrStruct {
        IrStruct {
            name: self.names.record.clone(),
            docs,
            derives: vec![Derive::Debug, Derive::Clone],
            serde: Vec::new(),
            fields,
            visibility: Visibility::Public,
        }
    }

    fn args_type(&self) -> IrType {
        IrType::named(self.names.args.clone())
    }

    /// `new(name, args)` for resources and data sources.
    fn named_constructor(&self, extra: Vec<(String, IrExpr)>) -> IrMethod {
        let mut fields = vec![
            ("name".to_string(), IrExpr::Into(Box::new(IrExpr::var("name")))),
            ("args".to_string(), IrExpr::var("args")),
        ];
        fields.extend(extra);
        IrMethod {
            name: "new".to_string(),
            docs: Vec::new(),
            visibility: Visibility::Public,
            receiver: Receiver::None,
            params: vec![
                ("name".to_string(), IrType::ImplInto(Box::new(IrType::String))),
                ("args".to_string(), self.args_type()),
            ],
            return_type: IrType::SelfType,
            body: vec![IrStmt::Expr(IrExpr::StructLit(fields))],
        }
    }

    /// `attributes()`: typed references rooted at this entity.
    fn attributes_method(&self) -> IrMethod {
        let ty = IrType::named(self.names.attributes.clone());
        IrMethod::getter(
            "attributes",
            ty.clone(),
            IrExpr::FromReference {
                ty,
                reference: Box::new(IrExpr::SelfReference),
            },
        )
        .with_docs(vec!["Typed references to this entity's attributes.".to_string()])
    }

    fn referencable_impl(&self, constructor: &str) -> IrItem {
        IrItem::Impl(IrImpl {
            target: self.names.record.clone(),
            trait_id: Some(RuntimeItemId::Referencable),
            methods: vec![IrMethod::getter(
                "reference",
                runtime(RuntimeItemId::Reference),
                IrExpr::call(
                    Callee::RuntimeAssoc(RuntimeItemId::Reference, constructor.to_string()),
                    vec![IrExpr::str(self.entity.type_name), IrExpr::self_field("name").borrow()],
                ),
            )],
        })
    }

    fn resource_items(&self) -> Vec<IrItem> {
        let state = IrType::named(self.names.state.clone());
        let record = self.record(
            vec![format!("The `{}` resource.", self.entity.type_name)],
            vec![
                IrField::new("name", IrType::String).with_docs(vec!["Local name in the configuration.".to_string()]),
                IrField::new("args", self.args_type()),
                IrField::new("state", IrType::option(state.clone()))
                    .with_docs(vec!["Decoded state, once imported.".to_string()]),
                IrField::new("depends_on", runtime(RuntimeItemId::DependsOn)),
                IrField::new("lifecycle", IrType::option(runtime(RuntimeItemId::Lifecycle))),
            ],
        );

        let state_ref = IrExpr::self_field("state").method("as_ref", Vec::new());
        let inherent = IrImpl {
            target: self.names.record.clone(),
            trait_id: None,
            methods: vec![
                self.named_constructor(vec![
                    ("state".to_string(), IrExpr::None),
                    ("depends_on".to_string(), IrExpr::Default(runtime(RuntimeItemId::DependsOn))),
                    ("lifecycle".to_string(), IrExpr::None),
                ]),
                self.attributes_method(),
                IrMethod::getter("state", IrType::option(IrType::reference(state.clone())), state_ref.clone())
                    .with_docs(vec!["Decoded state, if any has been imported.".to_string()]),
                IrMethod::getter(
                    "state_must",
                    IrType::reference(state),
                    IrExpr::UnwrapOrPanic {
                        value: Box::new(state_ref),
                        message: "resource `{}` has no imported state".to_string(),
                        args: vec![IrExpr::SelfReference],
                    },
                )
                .with_docs(vec![
                    "Decoded state.".to_string(),
                    String::new(),
                    "# Panics".to_string(),
                    String::new(),
                    "If no state has been imported.".to_string(),
                ]),
            ],
        };

        let import_state = IrMethod {
            name: "import_state".to_string(),
            docs: Vec::new(),
            visibility: Visibility::Private,
            receiver: Receiver::RefMut,
            params: vec![("payload".to_string(), IrType::Bytes)],
            return_type: IrType::Result(Box::new(IrType::Unit), Box::new(runtime(RuntimeItemId::StateError))),
            body: vec![
                IrStmt::Assign {
                    target: IrExpr::self_field("state"),
                    value: IrExpr::Some(Box::new(IrExpr::Try(Box::new(IrExpr::call(
                        Callee::Runtime(RuntimeItemId::DecodeState),
                        vec![IrExpr::var("payload")],
                    ))))),
                },
                IrStmt::Expr(IrExpr::Ok(Box::new(IrExpr::Unit))),
            ],
        };
        let resource = IrImpl {
            target: self.names.record.clone(),
            trait_id: Some(RuntimeItemId::Resource),
            methods: vec![
                IrMethod::getter(
                    "resource_type",
                    IrType::StaticStr,
                    IrExpr::str(self.entity.type_name),
                ),
                str_getter("local_name", IrExpr::self_field("name").borrow()),
                configuration_method(),
                IrMethod::getter(
                    "dependencies",
                    IrType::reference(runtime(RuntimeItemId::DependsOn)),
                    IrExpr::self_field("depends_on").borrow(),
                ),
                IrMethod::getter(
                    "lifecycle_management",
                    IrType::option(IrType::reference(runtime(RuntimeItemId::Lifecycle))),
                    IrExpr::self_field("lifecycle").method("as_ref", Vec::new()),
                ),
                import_state,
            ],
        };

        vec![
            IrItem::Struct(record),
            IrItem::Impl(inherent),
            self.referencable_impl("resource"),
            IrItem::Impl(resource),
        ]
    }

    fn data_source_items(&self) -> Vec<IrItem> {
        let record = self.record(
            vec![format!("The `{}` data source.", self.entity.type_name)],
            vec![
                IrField::new("name", IrType::String).with_docs(vec!["Local name in the configuration.".to_string()]),
                IrField::new("args", self.args_type()),
            ],
        );
        let inherent = IrImpl {
            target: self.names.record.clone(),
            trait_id: None,
            methods: vec![self.named_constructor(Vec::new()), self.attributes_method()],
        };
        let data_source = IrImpl {
            target: self.names.record.clone(),
            trait_id: Some(RuntimeItemId::DataSource),
            methods: vec![
                IrMethod::getter(
                    "data_source_type",
                    IrType::StaticStr,
                    IrExpr::str(self.entity.type_name),
                ),
                str_getter("local_name", IrExpr::self_field("name").borrow()),
                configuration_method(),
            ],
        };
        vec![
            IrItem::Struct(record),
            IrItem::Impl(inherent),
            self.referencable_impl("data_source"),
            IrItem::Impl(data_source),
        ]
    }

    fn provider_items(&self) -> Vec<IrItem> {
        let provider = self.entity.provider;
        let record = self.record(
            vec![format!("Configuration of the `{}` provider.", provider.source)],
            vec![
                IrField::new("local_name", IrType::String),
                IrField::new("source", IrType::String),
                IrField::new("version", IrType::String),
                IrField::new("args", self.args_type()),
            ],
        );
        let literal = |value: &str| IrExpr::Into(Box::new(IrExpr::str(value)));
        let constructor = IrMethod {
            name: "new".to_string(),
            docs: vec![format!(
                "A `{}` provider pinned to the version the bindings were generated from.",
                provider.local_name
            )],
            visibility: Visibility::Public,
            receiver: Receiver::None,
            params: vec![("args".to_string(), self.args_type())],
            return_type: IrType::SelfType,
            body: vec![IrStmt::Expr(IrExpr::StructLit(vec![
                ("local_name".to_string(), literal(&provider.local_name)),
                ("source".to_string(), literal(&provider.source)),
                ("version".to_string(), literal(&provider.version)),
                ("args".to_string(), IrExpr::var("args")),
            ]))],
        };
        let inherent = IrImpl {
            target: self.names.record.clone(),
            trait_id: None,
            methods: vec![constructor],
        };
        let provider_impl = IrImpl {
            target: self.names.record.clone(),
            trait_id: Some(RuntimeItemId::Provider),
            methods: vec![
                str_getter("local_name", IrExpr::self_field("local_name").borrow()),
                str_getter("source", IrExpr::self_field("source").borrow()),
                str_getter("version", IrExpr::self_field("version").borrow()),
                configuration_method(),
            ],
        };
        vec![IrItem::Struct(record), IrItem::Impl(inherent), IrItem::Impl(provider_impl)]
    }
}
