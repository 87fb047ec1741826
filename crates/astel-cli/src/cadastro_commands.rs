//! Registration ("Dados Cadastrais") subcommands.

use std::path::PathBuf;

use astel_core::{PageRequest, PaymentMethod, RegistrationFilter, RegistrationRecord};
use clap::{Args, Subcommand};

use crate::commands::{ExportArgs, PageArgs};

/// Registration commands.
#[derive(Subcommand)]
pub enum CadastroCommand {
    /// List registrations matching a filter
    List {
        #[command(flatten)]
        filter: RegistrationFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one registration
    Get {
        /// Registration id
        id: i64,
    },
    /// Create a registration
    Create {
        #[command(flatten)]
        fields: RegistrationFields,
    },
    /// Update a registration; omitted fields keep their current value
    Update {
        /// Registration id
        id: i64,
        #[command(flatten)]
        fields: RegistrationFields,
    },
    /// Delete a registration
    Delete {
        /// Registration id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Upload a registration spreadsheet
    Import {
        /// Spreadsheet to upload
        file: PathBuf,
    },
    /// Export registrations matching a filter
    Export {
        #[command(flatten)]
        filter: RegistrationFilterArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Look up registrations by partial name
    Find {
        /// At least two characters of the name
        term: String,
        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

/// Registration list/export filter.
#[derive(Args, Debug, Clone, Default)]
pub struct RegistrationFilterArgs {
    /// Name fragment
    #[arg(long)]
    pub nome: Option<String>,
    /// CPF fragment
    #[arg(long)]
    pub cpf: Option<String>,
    /// ASTEL registration number
    #[arg(long = "matricula-astel")]
    pub matricula_astel: Option<i64>,
    /// Payment method
    #[arg(long = "forma-pagamento")]
    pub forma_pagamento: Option<PaymentMethod>,
    /// Active flag (true/false)
    #[arg(long)]
    pub ativo: Option<bool>,
}

impl RegistrationFilterArgs {
    pub fn to_filter(&self, page: PageRequest) -> RegistrationFilter {
        RegistrationFilter {
            nome: self.nome.clone(),
            cpf: self.cpf.clone(),
            matricula_astel: self.matricula_astel,
            forma_pagamento: self.forma_pagamento.clone(),
            ativo: self.ativo,
            page,
        }
    }
}

/// Editable registration fields.
#[derive(Args, Debug, Clone, Default)]
pub struct RegistrationFields {
    #[arg(long)]
    pub nome: Option<String>,
    #[arg(long = "matricula-sistel")]
    pub matricula_sistel: Option<i64>,
    #[arg(long = "matricula-astel")]
    pub matricula_astel: Option<i64>,
    #[arg(long)]
    pub cpf: Option<String>,
    #[arg(long)]
    pub rg: Option<String>,
    #[arg(long)]
    pub endereco: Option<String>,
    #[arg(long)]
    pub logradouro: Option<String>,
    #[arg(long)]
    pub numero: Option<String>,
    #[arg(long)]
    pub complemento: Option<String>,
    #[arg(long)]
    pub bairro: Option<String>,
    #[arg(long)]
    pub cep: Option<String>,
    #[arg(long)]
    pub cidade: Option<String>,
    #[arg(long)]
    pub estado: Option<String>,
    #[arg(long = "tipo-endereco")]
    pub tipo_endereco: Option<String>,
    #[arg(long)]
    pub correspondencia: Option<String>,
    #[arg(long)]
    pub telefone: Option<String>,
    #[arg(long = "cel-skype")]
    pub cel_skype: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub situacao: Option<String>,
    #[arg(long = "estado-civil")]
    pub estado_civil: Option<String>,
    #[arg(long = "nome-esposa")]
    pub nome_esposa: Option<String>,
    #[arg(long = "valor-beneficio")]
    pub valor_beneficio: Option<f64>,
    #[arg(long = "forma-pagamento")]
    pub forma_pagamento: Option<PaymentMethod>,
    /// Active flag (true/false)
    #[arg(long)]
    pub ativo: Option<bool>,
    /// Payroll deduction flag (true/false)
    #[arg(long = "desconto-folha")]
    pub desconto_folha: Option<bool>,
}

impl RegistrationFields {
    /// Overlay the given fields on `base`.
    pub fn apply(self, base: RegistrationRecord) -> RegistrationRecord {
        RegistrationRecord {
            nome: self.nome.or(base.nome),
            matricula_sistel: self.matricula_sistel.unwrap_or(base.matricula_sistel),
            matricula_astel: self.matricula_astel.unwrap_or(base.matricula_astel),
            cpf: self.cpf.or(base.cpf),
            rg: self.rg.or(base.rg),
            endereco: self.endereco.or(base.endereco),
            logradouro: self.logradouro.or(base.logradouro),
            numero: self.numero.or(base.numero),
            complemento: self.complemento.or(base.complemento),
            bairro: self.bairro.or(base.bairro),
            cep: self.cep.or(base.cep),
            cidade: self.cidade.or(base.cidade),
            estado: self.estado.or(base.estado),
            tipo_endereco: self.tipo_endereco.or(base.tipo_endereco),
            correspondencia: self.correspondencia.or(base.correspondencia),
            telefone: self.telefone.or(base.telefone),
            cel_skype: self.cel_skype.or(base.cel_skype),
            email: self.email.or(base.email),
            situacao: self.situacao.or(base.situacao),
            estado_civil: self.estado_civil.or(base.estado_civil),
            nome_esposa: self.nome_esposa.or(base.nome_esposa),
            valor_beneficio: self.valor_beneficio.or(base.valor_beneficio),
            forma_pagamento: self.forma_pagamento.or(base.forma_pagamento),
            ativo: self.ativo.or(base.ativo),
            desconto_folha: self.desconto_folha.or(base.desconto_folha),
            id: base.id,
        }
    }
}
