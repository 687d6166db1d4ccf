//! Submission form screen for new escrituras

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

use crate::escritura::attachments::{PdfAttachment, MAX_ATTACHMENTS};
use crate::escritura::submission::{Submission, SubmissionProgress};
use crate::models::TipoEscritura;
use crate::tui::ui::{centered_rect, InputField, SelectableList, Styles};

/// Form fields, top to bottom. The list is rebuilt whenever the selected
/// type changes, since two of the fields are conditional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NovaField {
    Tipo,
    TipoOutro,
    Partes,
    Valor,
    Observacoes,
    Documentos,
}

impl NovaField {
    pub fn as_str(&self) -> &str {
        match self {
            NovaField::Tipo => "Tipo de Escritura *",
            NovaField::TipoOutro => "Especifique o Tipo *",
            NovaField::Partes => "Partes Envolvidas",
            NovaField::Valor => "Valor do Negócio/Bem (R$)",
            NovaField::Observacoes => "Observações",
            NovaField::Documentos => "Documentos",
        }
    }
}

/// Submission form state
pub struct NovaEscrituraScreen {
    pub current_field: usize,
    pub fields: Vec<NovaField>,

    pub tipo_list: SelectableList<TipoEscritura>,
    pub show_tipo_dropdown: bool,

    pub tipo_outro_input: InputField,
    pub partes_input: InputField,
    pub valor_input: InputField,
    pub observacoes_input: InputField,

    pub anexos: Vec<PdfAttachment>,
    pub selected_anexo: usize,
    pub file_path_input: InputField,
    pub show_file_input: bool,

    pub is_processing: bool,
    pub progress: Option<SubmissionProgress>,
    pub progress_rx: Option<mpsc::UnboundedReceiver<SubmissionProgress>>,
}

impl NovaEscrituraScreen {
    pub fn new() -> Self {
        let tipo_list = {
            let mut list = SelectableList::new(TipoEscritura::all().to_vec());
            list.select(None); // no type chosen until the user picks one
            list
        };

        let mut screen = Self {
            current_field: 0,
            fields: Vec::new(),

            tipo_list,
            show_tipo_dropdown: false,

            tipo_outro_input: InputField::new(NovaField::TipoOutro.as_str())
                .with_placeholder("Ex: Escritura de Permuta"),
            partes_input: InputField::new(NovaField::Partes.as_str())
                .with_placeholder("Ex: João Silva e Maria Santos"),
            valor_input: InputField::new(NovaField::Valor.as_str())
                .with_placeholder("Ex: 500000.00"),
            observacoes_input: InputField::new(NovaField::Observacoes.as_str())
                .with_placeholder("Informações adicionais que a IA deve considerar..."),

            anexos: Vec::new(),
            selected_anexo: 0,
            file_path_input: InputField::new("Caminho do arquivo PDF")
                .with_placeholder("/caminho/para/documento.pdf"),
            show_file_input: false,

            is_processing: false,
            progress: None,
            progress_rx: None,
        };
        screen.rebuild_fields();
        screen
    }

    /// Drop all form state, used when reopening the screen
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn selected_tipo(&self) -> Option<TipoEscritura> {
        self.tipo_list.selected().copied()
    }

    pub fn current(&self) -> NovaField {
        self.fields[self.current_field]
    }

    /// Recompute the visible field list after a type change
    pub fn rebuild_fields(&mut self) {
        let tipo = self.selected_tipo();
        let mut fields = vec![NovaField::Tipo];
        if tipo == Some(TipoEscritura::Outro) {
            fields.push(NovaField::TipoOutro);
        }
        fields.push(NovaField::Partes);
        if tipo.map(|t| t.requires_value()).unwrap_or(false) {
            fields.push(NovaField::Valor);
        }
        fields.push(NovaField::Observacoes);
        fields.push(NovaField::Documentos);

        self.fields = fields;
        if self.current_field >= self.fields.len() {
            self.current_field = self.fields.len() - 1;
        }
        self.update_field_focus();
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.fields.len();
        self.update_field_focus();
    }

    pub fn previous_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.fields.len() - 1
        } else {
            self.current_field - 1
        };
        self.update_field_focus();
    }

    pub fn focus_up(&mut self) {
        if self.current_field > 0 {
            self.current_field -= 1;
            self.update_field_focus();
        }
    }

    pub fn focus_down(&mut self) {
        if self.current_field < self.fields.len() - 1 {
            self.current_field += 1;
            self.update_field_focus();
        }
    }

    pub fn update_field_focus(&mut self) {
        self.tipo_outro_input.set_focus(false);
        self.partes_input.set_focus(false);
        self.valor_input.set_focus(false);
        self.observacoes_input.set_focus(false);

        match self.current() {
            NovaField::TipoOutro => self.tipo_outro_input.set_focus(true),
            NovaField::Partes => self.partes_input.set_focus(true),
            NovaField::Valor => self.valor_input.set_focus(true),
            NovaField::Observacoes => self.observacoes_input.set_focus(true),
            NovaField::Tipo | NovaField::Documentos => {}
        }
    }

    fn current_input_mut(&mut self) -> Option<&mut InputField> {
        match self.current() {
            NovaField::TipoOutro => Some(&mut self.tipo_outro_input),
            NovaField::Partes => Some(&mut self.partes_input),
            NovaField::Valor => Some(&mut self.valor_input),
            NovaField::Observacoes => Some(&mut self.observacoes_input),
            NovaField::Tipo | NovaField::Documentos => None,
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if let Some(input) = self.current_input_mut() {
            input.insert_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.delete_char();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.delete_char_forward();
        }
    }

    pub fn handle_cursor_left(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_cursor_left();
        }
    }

    pub fn handle_cursor_right(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_cursor_right();
        }
    }

    pub fn handle_cursor_home(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_cursor_to_start();
        }
    }

    pub fn handle_cursor_end(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_cursor_to_end();
        }
    }

    pub fn select_anexo_left(&mut self) {
        if self.selected_anexo > 0 {
            self.selected_anexo -= 1;
        }
    }

    pub fn select_anexo_right(&mut self) {
        if !self.anexos.is_empty() && self.selected_anexo < self.anexos.len() - 1 {
            self.selected_anexo += 1;
        }
    }

    pub fn remove_selected_anexo(&mut self) {
        if self.selected_anexo < self.anexos.len() {
            self.anexos.remove(self.selected_anexo);
            if self.selected_anexo > 0 && self.selected_anexo >= self.anexos.len() {
                self.selected_anexo = self.anexos.len() - 1;
            }
        }
    }

    /// Assemble the submission payload from the form values. Returns a user
    /// facing message when the value field does not parse.
    pub fn build_submission(&self) -> Result<Submission, String> {
        let valor = parse_valor(&self.valor_input.value)?;
        Ok(Submission {
            tipo: self.selected_tipo(),
            tipo_outro: self.tipo_outro_input.value.clone(),
            partes_envolvidas: self.partes_input.value.trim().to_string(),
            valor_negocio: valor,
            observacoes: self.observacoes_input.value.clone(),
            anexos: self.anexos.clone(),
        })
    }

    /// Draw the submission form
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Form
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_form(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);

        if self.show_tipo_dropdown {
            self.draw_tipo_dropdown(f, area);
        }
        if self.show_file_input {
            self.draw_file_input(f, area);
        }
        if self.is_processing {
            self.draw_processing(f, area);
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Nova Escritura - Envie os documentos e deixe a IA gerar a escritura (simulado)")
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_form(&mut self, f: &mut Frame, area: Rect) {
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|field| match field {
                NovaField::Documentos => Constraint::Min(6),
                _ => Constraint::Length(3),
            })
            .collect();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for i in 0..self.fields.len() {
            match self.fields[i] {
                NovaField::Tipo => self.draw_tipo_field(f, chunks[i]),
                NovaField::TipoOutro => self.tipo_outro_input.render(f, chunks[i]),
                NovaField::Partes => self.partes_input.render(f, chunks[i]),
                NovaField::Valor => self.valor_input.render(f, chunks[i]),
                NovaField::Observacoes => self.observacoes_input.render(f, chunks[i]),
                NovaField::Documentos => self.draw_documentos(f, chunks[i]),
            }
        }
    }

    fn draw_tipo_field(&self, f: &mut Frame, area: Rect) {
        let selected = self.selected_tipo().map(|t| t.label());
        let display = selected.unwrap_or("Selecione o tipo");

        let border_style = if self.current() == NovaField::Tipo {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };
        let text_style = if selected.is_some() {
            Styles::default()
        } else {
            Styles::inactive()
        };

        let field = Paragraph::new(display).style(text_style).block(
            Block::default()
                .title(format!("{} (Enter para escolher)", NovaField::Tipo.as_str()))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(field, area);
    }

    fn draw_documentos(&self, f: &mut Frame, area: Rect) {
        let focused = self.current() == NovaField::Documentos;
        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let mut lines: Vec<Line> = Vec::new();
        if self.anexos.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nenhum documento anexado",
                Styles::inactive(),
            )));
        } else {
            for (i, anexo) in self.anexos.iter().enumerate() {
                let style = if focused && i == self.selected_anexo {
                    Styles::selected()
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "▪ {} ({} página(s), {:.2} MB)",
                        anexo.file_name,
                        anexo.pages,
                        anexo.size_mb()
                    ),
                    style,
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Apenas arquivos PDF • Máximo 10 arquivos",
            Styles::inactive(),
        )));

        let widget = Paragraph::new(lines).block(
            Block::default()
                .title(format!(
                    "Documentos ({}/{}) - Enter: adicionar | ←/→: selecionar | Del: remover",
                    self.anexos.len(),
                    MAX_ATTACHMENTS
                ))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(widget, area);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from("Tab/Shift+Tab: Navegar campos | ↑/↓: Navegar | Enter: Escolher/Avançar"),
            Line::from("Ctrl+E: Gerar Escritura com IA | Esc: Cancelar"),
        ];

        let widget = Paragraph::new(instructions).style(Styles::info()).block(
            Block::default()
                .title("Comandos")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(widget, area);
    }

    fn draw_tipo_dropdown(&mut self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(40, 60, area);

        let items: Vec<ListItem> = self
            .tipo_list
            .items
            .iter()
            .enumerate()
            .map(|(i, tipo)| {
                let style = if Some(i) == self.tipo_list.selected_index() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(tipo.label(), style)))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Selecione o tipo")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_widget(Clear, popup_area);
        f.render_stateful_widget(list, popup_area, &mut self.tipo_list.state);
    }

    fn draw_file_input(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 20, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Adicionar Documento")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        f.render_widget(block, popup_area);

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(popup_area);

        self.file_path_input.render(f, inner[0]);

        let hint = Paragraph::new("Enter: Anexar | Esc: Cancelar").style(Styles::inactive());
        f.render_widget(hint, inner[1]);
    }

    fn draw_processing(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 40, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Processando Escritura...")
            .borders(Borders::ALL)
            .border_style(Styles::warning());
        f.render_widget(block, popup_area);

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(popup_area);

        let caption =
            Paragraph::new("A IA está analisando os documentos e gerando a escritura (simulado)")
                .style(Styles::default());
        f.render_widget(caption, inner[0]);

        let percent = self.progress.as_ref().map(|p| p.percent()).unwrap_or(0);
        let gauge = Gauge::default()
            .gauge_style(Styles::info())
            .percent(percent)
            .label(format!("{}% concluído", percent));
        f.render_widget(gauge, inner[1]);

        let phase_text = match &self.progress {
            Some(SubmissionProgress::Submitted) => "Enviando documentos...",
            Some(SubmissionProgress::Processing) => "Gerando minuta da escritura...",
            Some(SubmissionProgress::Complete { .. }) => "Concluído!",
            Some(SubmissionProgress::Failed { .. }) | None => "Iniciando...",
        };
        let phase = Paragraph::new(phase_text).style(Styles::inactive());
        f.render_widget(phase, inner[2]);
    }
}

/// Parse the business value field. Accepts a decimal comma as typed on
/// Brazilian keyboards, an empty field means no value.
pub(crate) fn parse_valor(input: &str) -> Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| "Informe um valor numérico válido para o negócio".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valor_accepts_comma_and_dot_decimals() {
        assert_eq!(parse_valor(""), Ok(None));
        assert_eq!(parse_valor("  "), Ok(None));
        assert_eq!(parse_valor("500000"), Ok(Some(500000.0)));
        assert_eq!(parse_valor("500000.50"), Ok(Some(500000.5)));
        assert_eq!(parse_valor("500000,50"), Ok(Some(500000.5)));
        assert!(parse_valor("quinhentos mil").is_err());
    }

    #[test]
    fn field_list_follows_selected_tipo() {
        let mut screen = NovaEscrituraScreen::new();
        assert_eq!(
            screen.fields,
            vec![
                NovaField::Tipo,
                NovaField::Partes,
                NovaField::Observacoes,
                NovaField::Documentos
            ]
        );

        // Compra e venda carries a value field
        screen.tipo_list.select(Some(0));
        assert_eq!(screen.selected_tipo(), Some(TipoEscritura::CompraVenda));
        screen.rebuild_fields();
        assert!(screen.fields.contains(&NovaField::Valor));
        assert!(!screen.fields.contains(&NovaField::TipoOutro));

        // Outro asks for a custom label but no value
        let outro_idx = TipoEscritura::all()
            .iter()
            .position(|t| *t == TipoEscritura::Outro)
            .unwrap();
        screen.tipo_list.select(Some(outro_idx));
        screen.rebuild_fields();
        assert!(screen.fields.contains(&NovaField::TipoOutro));
        assert!(!screen.fields.contains(&NovaField::Valor));
    }

    #[test]
    fn removing_last_anexo_keeps_selection_in_range() {
        let mut screen = NovaEscrituraScreen::new();
        for name in ["a.pdf", "b.pdf"] {
            screen.anexos.push(PdfAttachment {
                path: name.into(),
                file_name: name.to_string(),
                size_bytes: 10,
                pages: 1,
            });
        }
        screen.selected_anexo = 1;
        screen.remove_selected_anexo();
        assert_eq!(screen.anexos.len(), 1);
        assert_eq!(screen.selected_anexo, 0);

        screen.remove_selected_anexo();
        assert!(screen.anexos.is_empty());
        assert_eq!(screen.selected_anexo, 0);
    }
}
