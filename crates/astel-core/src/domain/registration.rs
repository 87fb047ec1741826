use serde::{Deserialize, Deserializer, Serialize};

use super::PaymentMethod;

/// A beneficiary's registration profile ("Dados Cadastrais").
///
/// `id` is the service's surrogate key; `matricula_sistel` and
/// `matricula_astel` are the legacy numeric identifiers. Everything else is
/// optional because imported spreadsheets leave most columns blank. A
/// `null` matrícula reads as 0, the same as an unset one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub matricula_sistel: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub matricula_astel: i64,

    pub nome: Option<String>,
    pub endereco: Option<String>,
    /// Free-text status.
    pub situacao: Option<String>,
    pub valor_beneficio: Option<f64>,
    pub estado_civil: Option<String>,
    pub telefone: Option<String>,
    pub nome_esposa: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub ativo: Option<bool>,
    pub desconto_folha: Option<bool>,
    pub forma_pagamento: Option<PaymentMethod>,

    // Address and contact
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cep: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub tipo_endereco: Option<String>,
    pub correspondencia: Option<String>,
    pub cel_skype: Option<String>,
    pub email: Option<String>,
}

impl RegistrationRecord {
    /// Normalise the record before it is sent to the service.
    ///
    /// Every text field is trimmed. The identity fields (`nome`,
    /// `endereco`, `estado_civil`, `telefone`, `nome_esposa`, `cpf`, `rg`)
    /// become an empty string when blank; every other blank text field
    /// becomes `None`. A zero benefit amount is sent as `None`, and an
    /// `Other` payment method that is blank is dropped.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.nome,
            &mut self.endereco,
            &mut self.estado_civil,
            &mut self.telefone,
            &mut self.nome_esposa,
            &mut self.cpf,
            &mut self.rg,
        ] {
            *field = Some(field.as_deref().map(str::trim).unwrap_or_default().to_string());
        }

        for field in [
            &mut self.situacao,
            &mut self.logradouro,
            &mut self.numero,
            &mut self.complemento,
            &mut self.bairro,
            &mut self.cep,
            &mut self.cidade,
            &mut self.estado,
            &mut self.tipo_endereco,
            &mut self.correspondencia,
            &mut self.cel_skype,
            &mut self.email,
        ] {
            *field = blank_to_none(field.take());
        }

        self.valor_beneficio = self.valor_beneficio.filter(|v| v.abs() > 0.0);

        self.forma_pagamento = match self.forma_pagamento.take() {
            Some(PaymentMethod::Other(raw)) => {
                blank_to_none(Some(raw)).map(PaymentMethod::Other)
            }
            other => other,
        };

        self
    }

    /// Display name, falling back to the ASTEL registration number.
    pub fn display_name(&self) -> String {
        self.nome
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| format!("#{}", self.matricula_astel), str::to_string)
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(d)?.unwrap_or_default())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A registration summary returned by the name autocomplete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteItem {
    pub id: i64,
    pub nome: String,
    pub matricula_astel: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalized_trims_and_blanks() {
        let record = RegistrationRecord {
            nome: Some("  Maria Silva ".to_string()),
            cpf: None,
            rg: Some("   ".to_string()),
            cidade: Some(" ".to_string()),
            email: Some(" maria@example.com ".to_string()),
            forma_pagamento: Some(PaymentMethod::Other("  ".to_string())),
            ..Default::default()
        }
        .normalized();

        assert_eq!(record.nome.as_deref(), Some("Maria Silva"));
        assert_eq!(record.cpf.as_deref(), Some(""));
        assert_eq!(record.rg.as_deref(), Some(""));
        assert_eq!(record.cidade, None);
        assert_eq!(record.email.as_deref(), Some("maria@example.com"));
        assert_eq!(record.forma_pagamento, None);
    }

    #[test]
    fn test_normalized_keeps_known_payment_method() {
        let record = RegistrationRecord {
            forma_pagamento: Some(PaymentMethod::SistelPayroll),
            ..Default::default()
        }
        .normalized();
        assert_eq!(record.forma_pagamento, Some(PaymentMethod::SistelPayroll));
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let record: RegistrationRecord = serde_json::from_value(json!({
            "id": 7,
            "matriculaSistel": 1001,
            "matriculaAstel": 55,
            "nome": "João",
            "celSkype": null,
            "formaPagamento": "DEPOSITO MENSAL",
            "descontoFolha": true
        }))
        .unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.matricula_astel, 55);
        assert_eq!(record.cel_skype, None);
        assert_eq!(record.forma_pagamento, Some(PaymentMethod::MonthlyDeposit));
        assert_eq!(record.desconto_folha, Some(true));
        assert_eq!(record.ativo, None);
    }

    #[test]
    fn test_deserialize_null_matriculas() {
        let record: RegistrationRecord = serde_json::from_value(json!({
            "id": 9,
            "matriculaSistel": null,
            "matriculaAstel": null,
            "nome": "Carla"
        }))
        .unwrap();

        assert_eq!(record.id, 9);
        assert_eq!(record.matricula_sistel, 0);
        assert_eq!(record.matricula_astel, 0);
        assert_eq!(record.display_name(), "Carla");
    }

    #[test]
    fn test_normalized_drops_zero_benefit() {
        let zero = RegistrationRecord {
            valor_beneficio: Some(0.0),
            ..Default::default()
        }
        .normalized();
        assert_eq!(zero.valor_beneficio, None);

        let set = RegistrationRecord {
            valor_beneficio: Some(1250.75),
            ..Default::default()
        }
        .normalized();
        assert_eq!(set.valor_beneficio, Some(1250.75));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let value = serde_json::to_value(RegistrationRecord {
            tipo_endereco: Some("RESIDENCIAL".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["tipoEndereco"], "RESIDENCIAL");
        assert!(value.get("matriculaSistel").is_some());
    }

    #[test]
    fn test_display_name_fallback() {
        let record = RegistrationRecord {
            matricula_astel: 42,
            nome: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), "#42");
    }
}
