//! Temática schema: API calls, form fields and parsing

use super::form::{FieldErrors, FieldKind, FormField, FormPanel, FormReader};
use super::{FormContext, Resource};
use crate::api::{ApiResult, CatalogApi};
use crate::types::{format_number, Tematica, DATE_FORMAT};

impl Resource for Tematica {
    const NOUN: &'static str = "temática";
    const PLURAL: &'static str = "Temáticas";
    const MSG_CREATED: &'static str = "Temática creada";
    const MSG_UPDATED: &'static str = "Temática actualizada";
    const MSG_DELETED: &'static str = "Temática borrada";
    const BLOCKED_MESSAGE: &'static str = "No se puede borrar la temática";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id: Some(id), ..self }
    }

    fn list_label(&self) -> String {
        self.nombre.clone()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())),
            ("Nombre", self.nombre.clone()),
            ("Descripción", self.descripcion.clone()),
            ("Popularidad", format_number(self.popularidad)),
            ("Activo", if self.activo { "Sí" } else { "No" }.into()),
            ("Fecha de creación", self.formatted_date()),
        ]
    }

    fn list(api: &dyn CatalogApi) -> ApiResult<Vec<Self>> {
        api.list_tematicas()
    }

    fn fetch(api: &dyn CatalogApi, id: u64) -> ApiResult<Self> {
        api.get_tematica(id)
    }

    fn create(api: &dyn CatalogApi, item: &Self) -> ApiResult<Self> {
        api.create_tematica(item)
    }

    fn update(api: &dyn CatalogApi, id: u64, item: &Self) -> ApiResult<Self> {
        api.update_tematica(id, item)
    }

    fn delete(api: &dyn CatalogApi, id: u64) -> ApiResult<()> {
        api.delete_tematica(id)
    }

    fn dependents(api: &dyn CatalogApi, id: u64) -> ApiResult<usize> {
        Ok(api.videos_by_tematica(id)?.len())
    }

    fn form_fields(current: Option<&Self>, _ctx: &FormContext) -> Vec<FormField> {
        let fields = vec![
            FormField::new("nombre", "Nombre", FieldKind::Text),
            FormField::new("descripcion", "Descripción", FieldKind::Text),
            FormField::new("popularidad", "Popularidad", FieldKind::Number),
            FormField::new("activo", "Activo", FieldKind::Checkbox).with_value("false"),
            FormField::new("fechaCreacion", "Fecha de creación", FieldKind::Date),
        ];

        let Some(t) = current else {
            return fields;
        };

        fields
            .into_iter()
            .map(|field| {
                let value = match field.key {
                    "nombre" => t.nombre.clone(),
                    "descripcion" => t.descripcion.clone(),
                    "popularidad" => format_number(t.popularidad),
                    "activo" => t.activo.to_string(),
                    "fechaCreacion" => t
                        .fecha_creacion
                        .map(|d| d.format(DATE_FORMAT).to_string())
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                field.with_value(value)
            })
            .collect()
    }

    fn from_form(form: &FormPanel) -> Result<Self, FieldErrors> {
        let mut reader = FormReader::new(form);
        let nombre = reader.text("nombre");
        let descripcion = reader.text("descripcion");
        let popularidad = reader.number("popularidad");
        let activo = reader.checked("activo");
        let fecha_creacion = reader.date("fechaCreacion");

        reader.finish(|| {
            Some(Tematica {
                id: None,
                nombre,
                descripcion,
                popularidad,
                activo,
                fecha_creacion,
            })
        })
    }
}
