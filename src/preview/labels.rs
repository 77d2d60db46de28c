//! Fixed document strings in each supported language

use crate::models::Language;

#[derive(Debug)]
pub struct Labels {
    pub custom_plan: &'static str,
    pub additional_services: &'static str,
    pub client_info: &'static str,
    pub name: &'static str,
    pub national_id: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub plan_features: &'static str,
    pub additional_details: &'static str,
    pub payroll_management: &'static str,
    pub employees: &'static str,
    pub issued_invoices: &'static str,
    pub received_invoices: &'static str,
    pub transactions: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub extra_features: &'static str,
    pub description: &'static str,
    pub value: &'static str,
    pub amount: &'static str,
    pub price_breakdown: &'static str,
    pub plan_cost: &'static str,
    pub payroll_cost: &'static str,
    pub invoice_cost: &'static str,
    pub transaction_cost: &'static str,
    pub extra_feature_cost: &'static str,
    pub discount: &'static str,
    pub total_cost: &'static str,
    pub date: &'static str,
    pub notes: &'static str,
    pub observation: &'static str,
    pub important_note: &'static str,
}

static SPANISH: Labels = Labels {
    custom_plan: "Plan Personalizado",
    additional_services: "Servicios Adicionales",
    client_info: "Información del Cliente",
    name: "Nombre",
    national_id: "Cédula",
    email: "Correo Electrónico",
    phone: "Teléfono",
    address: "Dirección",
    plan_features: "Características del Plan",
    additional_details: "Especificaciones Adicionales",
    payroll_management: "Manejo de Planilla",
    employees: "Cantidad de Colaboradores",
    issued_invoices: "Facturas Emitidas",
    received_invoices: "Facturas Recibidas",
    transactions: "Transacciones",
    yes: "Sí",
    no: "No",
    extra_features: "Características Extras",
    description: "Descripción",
    value: "Valor",
    amount: "Monto",
    price_breakdown: "Desglose de Precios",
    plan_cost: "Costo del Plan",
    payroll_cost: "Costo por Planilla",
    invoice_cost: "Costo de Facturación Electrónica",
    transaction_cost: "Costo de Transacciones",
    extra_feature_cost: "Costo de Características Extras",
    discount: "Descuento",
    total_cost: "Costo Total",
    date: "Fecha",
    notes: "La presente cotización tiene una validez de 15 días naturales.",
    observation: "Brindamos acompañamiento durante todo el servicio.",
    important_note: "El servicio no incluye certificaciones de ingresos, flujos proyectados por CPA, certificaciones literales, personerías jurídicas ni RTBF, salvo que se indique en esta cotización.",
};

static ENGLISH: Labels = Labels {
    custom_plan: "Custom Plan",
    additional_services: "Additional Services",
    client_info: "Client Information",
    name: "Name",
    national_id: "ID Number",
    email: "Email",
    phone: "Phone",
    address: "Address",
    plan_features: "Plan Features",
    additional_details: "Additional Specifications",
    payroll_management: "Payroll Management",
    employees: "Number of Employees",
    issued_invoices: "Issued Invoices",
    received_invoices: "Received Invoices",
    transactions: "Transactions",
    yes: "Yes",
    no: "No",
    extra_features: "Extra Features",
    description: "Description",
    value: "Value",
    amount: "Amount",
    price_breakdown: "Price Breakdown",
    plan_cost: "Plan Cost",
    payroll_cost: "Payroll Cost",
    invoice_cost: "Electronic Billing Cost",
    transaction_cost: "Transaction Cost",
    extra_feature_cost: "Extra Features Cost",
    discount: "Discount",
    total_cost: "Total Cost",
    date: "Date",
    notes: "This quotation is valid for 15 calendar days.",
    observation: "We stay with you throughout the engagement.",
    important_note: "The service does not include income certifications, CPA cash flow projections, literal certifications, legal entity certificates or RTBF filings unless stated in this quotation.",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Spanish => &SPANISH,
        Language::English => &ENGLISH,
    }
}
