//! Video schema: API calls, form fields and parsing

use super::form::{FieldErrors, FieldKind, FormField, FormPanel, FormReader, SelectOption};
use super::{FormContext, Resource};
use crate::api::{ApiResult, CatalogApi};
use crate::types::{format_number, Calidad, Clasificacion, Video, DATE_FORMAT};

impl Resource for Video {
    const NOUN: &'static str = "video";
    const PLURAL: &'static str = "Videos";
    const MSG_CREATED: &'static str = "Video creado";
    const MSG_UPDATED: &'static str = "Video actualizado";
    const MSG_DELETED: &'static str = "Video borrado";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id: Some(id), ..self }
    }

    fn list_label(&self) -> String {
        format!("{} · {}", self.titulo, self.autor)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Id", self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())),
            ("Título", self.titulo.clone()),
            ("Autor", self.autor.clone()),
            ("Duración", self.formatted_duration()),
            ("Calidad", self.calidad.as_str().into()),
            ("Clasificación", self.clasificacion.label().into()),
            ("Fecha de creación", self.formatted_date()),
            ("Temática", format!("#{}", self.tematica_id)),
        ]
    }

    fn list(api: &dyn CatalogApi) -> ApiResult<Vec<Self>> {
        api.list_videos()
    }

    fn fetch(api: &dyn CatalogApi, id: u64) -> ApiResult<Self> {
        api.get_video(id)
    }

    fn create(api: &dyn CatalogApi, item: &Self) -> ApiResult<Self> {
        api.create_video(item)
    }

    fn update(api: &dyn CatalogApi, id: u64, item: &Self) -> ApiResult<Self> {
        api.update_video(id, item)
    }

    fn delete(api: &dyn CatalogApi, id: u64) -> ApiResult<()> {
        api.delete_video(id)
    }

    fn form_fields(current: Option<&Self>, ctx: &FormContext) -> Vec<FormField> {
        let mut calidades: Vec<SelectOption> = Calidad::all()
            .iter()
            .map(|c| SelectOption::new(c.as_str(), c.as_str()))
            .collect();
        let mut clasificaciones: Vec<SelectOption> = Clasificacion::all()
            .iter()
            .map(|c| SelectOption::new(c.as_str(), c.label()))
            .collect();

        let mut tematicas: Vec<SelectOption> = ctx
            .tematicas
            .iter()
            .filter_map(|t| {
                t.id.map(|id| SelectOption::new(id.to_string(), format!("{} · {}", id, t.nombre)))
            })
            .collect();

        // Keep current values selectable even if they are not offered
        if let Some(v) = current {
            if let Calidad::Other(value) = &v.calidad {
                calidades.push(SelectOption::new(value.clone(), value.clone()));
            }
            if let Clasificacion::Other(value) = &v.clasificacion {
                clasificaciones.push(SelectOption::new(value.clone(), value.clone()));
            }

            let value = v.tematica_id.to_string();
            if !tematicas.iter().any(|o| o.value == value) {
                tematicas.push(SelectOption::new(value, format!("#{}", v.tematica_id)));
            }
        }

        let fields = vec![
            FormField::new("titulo", "Título", FieldKind::Text),
            FormField::new("autor", "Autor", FieldKind::Text),
            FormField::new("duracion", "Duración (s)", FieldKind::Number),
            FormField::new("calidad", "Calidad", FieldKind::Select(calidades)),
            FormField::new("clasificacion", "Clasificación", FieldKind::Select(clasificaciones)),
            FormField::new("fechaCreacion", "Fecha de creación", FieldKind::Date),
            FormField::new("tematicaId", "Temática", FieldKind::Select(tematicas)),
        ];

        let Some(v) = current else {
            return fields;
        };

        fields
            .into_iter()
            .map(|field| {
                let value = match field.key {
                    "titulo" => v.titulo.clone(),
                    "autor" => v.autor.clone(),
                    "duracion" => format_number(v.duracion),
                    "calidad" => v.calidad.as_str().to_string(),
                    "clasificacion" => v.clasificacion.as_str().to_string(),
                    "fechaCreacion" => v
                        .fecha_creacion
                        .map(|d| d.format(DATE_FORMAT).to_string())
                        .unwrap_or_default(),
                    "tematicaId" => v.tematica_id.to_string(),
                    _ => String::new(),
                };
                field.with_value(value)
            })
            .collect()
    }

    fn from_form(form: &FormPanel) -> Result<Self, FieldErrors> {
        let mut reader = FormReader::new(form);
        let titulo = reader.text("titulo");
        let autor = reader.text("autor");
        let duracion = reader.number("duracion");
        let calidad = reader.select("calidad", Calidad::from_value);
        let clasificacion = reader.select("clasificacion", Clasificacion::from_value);
        let fecha_creacion = reader.date("fechaCreacion");
        let tematica_id = reader.select("tematicaId", |v| v.parse::<u64>().ok());

        reader.finish(|| {
            Some(Video {
                id: None,
                titulo,
                autor,
                duracion,
                calidad: calidad?,
                clasificacion: clasificacion?,
                fecha_creacion,
                tematica_id: tematica_id?,
            })
        })
    }
}
