//! Record detail display for CLI output.

use astel_core::{PaymentRecord, RegistrationRecord};

use super::tables::{format_money, format_optional};

const EMPTY: &str = "--";

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => EMPTY.to_string(),
    }
}

fn text(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(EMPTY)
        .to_string()
}

/// Label/value pairs for a registration, in display order.
pub fn registration_lines(record: &RegistrationRecord) -> Vec<(&'static str, String)> {
    let matricula = |n: i64| {
        if n == 0 {
            EMPTY.to_string()
        } else {
            n.to_string()
        }
    };

    vec![
        ("ID", record.id.to_string()),
        ("Nome", text(&record.nome)),
        ("Matrícula SISTEL", matricula(record.matricula_sistel)),
        ("Matrícula ASTEL", matricula(record.matricula_astel)),
        ("CPF", text(&record.cpf)),
        ("RG", text(&record.rg)),
        ("Situação", text(&record.situacao)),
        ("Estado civil", text(&record.estado_civil)),
        ("Cônjuge", text(&record.nome_esposa)),
        ("Endereço", text(&record.endereco)),
        ("Logradouro", text(&record.logradouro)),
        ("Número", text(&record.numero)),
        ("Complemento", text(&record.complemento)),
        ("Bairro", text(&record.bairro)),
        ("CEP", text(&record.cep)),
        ("Cidade", text(&record.cidade)),
        ("Estado", text(&record.estado)),
        ("Tipo de endereço", text(&record.tipo_endereco)),
        ("Correspondência", text(&record.correspondencia)),
        ("Telefone", text(&record.telefone)),
        ("Cel/Skype", text(&record.cel_skype)),
        ("E-mail", text(&record.email)),
        (
            "Valor benefício",
            record.valor_beneficio.map_or_else(|| EMPTY.to_string(), format_money),
        ),
        ("Forma de pagamento", format_optional(&record.forma_pagamento, EMPTY)),
        ("Ativo", yes_no(record.ativo)),
        ("Desconto em folha", yes_no(record.desconto_folha)),
    ]
}

/// Display a registration to stdout.
pub fn display_registration(record: &RegistrationRecord, title: Option<&str>) {
    if let Some(title) = title {
        println!("{title}");
    }
    for (label, value) in registration_lines(record) {
        println!("  {label:<20} {value}");
    }
}

/// Display a payment to stdout.
pub fn display_payment(record: &PaymentRecord, title: Option<&str>) {
    if let Some(title) = title {
        println!("{title}");
    }
    println!("  Cadastro:   {}", record.id_dados_cadastrais);
    println!("  Referência: {:02}/{}", record.mes, record.ano);
    println!("  Valor:      {}", format_money(record.valor_pago));
    println!(
        "  Pago em:    {}",
        format_optional(&record.data_pagamento, EMPTY)
    );
}
