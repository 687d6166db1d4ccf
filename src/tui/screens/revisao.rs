//! Review screen: draft inspection, editing, approve/reject, export

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Escritura;
use crate::tui::editor::TextEditor;
use crate::tui::ui::{centered_rect, status_style, InputField, Styles};

/// What the screen is showing. The two error states mirror the messages a
/// clerk sees when following a dead link.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    MissingId,
    NotFound,
}

/// Review screen state
pub struct RevisaoScreen {
    pub state: LoadState,
    pub escritura: Option<Escritura>,
    pub scroll_offset: usize,
    pub is_editing: bool,
    pub editor: TextEditor,
    pub show_reject_dialog: bool,
    pub reject_input: InputField,
}

impl RevisaoScreen {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            escritura: None,
            scroll_offset: 0,
            is_editing: false,
            editor: TextEditor::from_text(""),
            show_reject_dialog: false,
            reject_input: InputField::new("Motivo da Rejeição")
                .with_placeholder("Descreva os problemas encontrados..."),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_escritura(&mut self, escritura: Escritura) {
        self.escritura = Some(escritura);
        self.state = LoadState::Ready;
        self.scroll_offset = 0;
        self.is_editing = false;
    }

    pub fn mark_missing_id(&mut self) {
        self.state = LoadState::MissingId;
        self.escritura = None;
    }

    pub fn mark_not_found(&mut self) {
        self.state = LoadState::NotFound;
        self.escritura = None;
    }

    /// Approve, reject, and edit are only offered while the record is still
    /// in flight. Signed-off records stay read-only.
    pub fn can_review(&self) -> bool {
        self.escritura
            .as_ref()
            .map(|e| !e.status.is_terminal())
            .unwrap_or(false)
    }

    pub fn start_editing(&mut self) {
        if let Some(escritura) = &self.escritura {
            self.editor = TextEditor::from_text(&escritura.conteudo_gerado);
            self.is_editing = true;
        }
    }

    pub fn stop_editing(&mut self) {
        self.is_editing = false;
    }

    pub fn open_reject_dialog(&mut self) {
        self.reject_input.clear();
        self.reject_input.set_focus(true);
        self.show_reject_dialog = true;
    }

    pub fn close_reject_dialog(&mut self) {
        self.show_reject_dialog = false;
        self.reject_input.set_focus(false);
    }

    /// Draw the review screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        match self.state {
            LoadState::Loading => {
                self.draw_message(f, area, "Carregando escritura...", Styles::info());
                return;
            }
            LoadState::MissingId => {
                self.draw_message(
                    f,
                    area,
                    "ID da escritura não especificado\n\nPressione ESC para voltar",
                    Styles::error(),
                );
                return;
            }
            LoadState::NotFound => {
                self.draw_message(
                    f,
                    area,
                    "Escritura não encontrada\n\nPressione ESC para voltar",
                    Styles::error(),
                );
                return;
            }
            LoadState::Ready => {}
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Content and sidebar
                Constraint::Length(3), // Key bar
            ])
            .split(area);

        self.draw_title(f, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);

        self.draw_content(f, body[0]);
        self.draw_sidebar(f, body[1]);
        self.draw_bottom_bar(f, chunks[2]);

        if self.show_reject_dialog {
            self.draw_reject_dialog(f, area);
        }
    }

    fn draw_message(&self, f: &mut Frame, area: Rect, message: &str, style: ratatui::style::Style) {
        let widget = Paragraph::new(message).style(style).block(
            Block::default()
                .title("Revisão de Escritura")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(widget, area);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let escritura = match &self.escritura {
            Some(e) => e,
            None => return,
        };
        let title = Paragraph::new(format!(
            "Revisão de Escritura - Protocolo: {}",
            escritura.numero_protocolo
        ))
        .style(Styles::title())
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_content(&mut self, f: &mut Frame, area: Rect) {
        if self.is_editing {
            self.editor.render(f, area, "Conteúdo da Escritura (editando)");
            return;
        }

        let escritura = match &self.escritura {
            Some(e) => e,
            None => return,
        };

        let visible: Vec<Line> = escritura
            .conteudo_gerado
            .lines()
            .skip(self.scroll_offset)
            .map(|l| Line::from(l.to_string()))
            .collect();

        let widget = Paragraph::new(visible)
            .block(
                Block::default()
                    .title("Conteúdo da Escritura")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }

    fn draw_sidebar(&self, f: &mut Frame, area: Rect) {
        let escritura = match &self.escritura {
            Some(e) => e,
            None => return,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Tipo: ", Styles::info()),
                Span::raw(escritura.tipo.label()),
            ]),
            Line::from(vec![
                Span::styled("Status: ", Styles::info()),
                Span::styled(escritura.status.label(), status_style(escritura.status)),
            ]),
        ];
        if !escritura.partes_envolvidas.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Partes: ", Styles::info()),
                Span::raw(escritura.partes_envolvidas.clone()),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Criado em: ", Styles::info()),
            Span::raw(escritura.criado_em.format("%d/%m/%Y %H:%M").to_string()),
        ]));
        if let Some(revisado_por) = &escritura.revisado_por {
            lines.push(Line::from(vec![
                Span::styled("Revisado por: ", Styles::info()),
                Span::raw(revisado_por.clone()),
            ]));
        }
        if let Some(data_revisao) = &escritura.data_revisao {
            lines.push(Line::from(vec![
                Span::styled("Data da revisão: ", Styles::info()),
                Span::raw(data_revisao.format("%d/%m/%Y %H:%M").to_string()),
            ]));
        }
        if let Some(observacoes) = &escritura.observacoes {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Observações:", Styles::info())));
            lines.push(Line::from(observacoes.clone()));
        }
        if let Some(motivo) = &escritura.motivo_rejeicao {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Motivo da Rejeição:",
                Styles::error(),
            )));
            lines.push(Line::from(Span::styled(motivo.clone(), Styles::error())));
        }

        let info = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Informações")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(info, chunks[0]);

        let doc_lines: Vec<Line> = if escritura.documentos_urls.is_empty() {
            vec![Line::from(Span::styled(
                "Nenhum documento",
                Styles::inactive(),
            ))]
        } else {
            escritura
                .documentos_urls
                .iter()
                .enumerate()
                .map(|(index, _)| Line::from(format!("Documento {}", index + 1)))
                .collect()
        };

        let docs = Paragraph::new(doc_lines).block(
            Block::default()
                .title(format!(
                    "Documentos Anexados ({})",
                    escritura.documentos_urls.len()
                ))
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(docs, chunks[1]);
    }

    fn draw_bottom_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.is_editing {
            "Ctrl+S: Salvar | Esc: Cancelar edição | Enter: Nova linha"
        } else if self.can_review() {
            "e: Editar | a: Aprovar | r: Rejeitar | b: Baixar | ↑/↓: Rolar | Esc: Voltar"
        } else {
            "b: Baixar | ↑/↓: Rolar | Esc: Voltar"
        };

        let widget = Paragraph::new(text)
            .style(Styles::info())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn draw_reject_dialog(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 30, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Rejeitar Escritura")
            .borders(Borders::ALL)
            .border_style(Styles::error());
        f.render_widget(block, popup_area);

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(popup_area);

        let description =
            Paragraph::new("Por favor, informe o motivo da rejeição para que seja corrigida.")
                .wrap(Wrap { trim: true });
        f.render_widget(description, inner[0]);

        self.reject_input.render(f, inner[1]);

        let hint =
            Paragraph::new("Enter: Confirmar Rejeição | Esc: Cancelar").style(Styles::inactive());
        f.render_widget(hint, inner[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StatusEscritura, TipoEscritura};
    use chrono::Utc;

    fn sample() -> Escritura {
        let mut escritura = Escritura::new(TipoEscritura::Doacao, "PROT-000000001", Utc::now());
        escritura.conteudo_gerado = "Linha um\nLinha dois".to_string();
        escritura
    }

    #[test]
    fn review_actions_offered_only_for_open_records() {
        let mut screen = RevisaoScreen::new();
        assert!(!screen.can_review());

        screen.set_escritura(sample());
        assert!(screen.can_review());

        let mut approved = sample();
        approved.status = StatusEscritura::Aprovada;
        screen.set_escritura(approved);
        assert!(!screen.can_review());
    }

    #[test]
    fn start_editing_loads_current_content() {
        let mut screen = RevisaoScreen::new();
        screen.set_escritura(sample());
        screen.start_editing();
        assert!(screen.is_editing);
        assert_eq!(screen.editor.text(), "Linha um\nLinha dois");
    }

    #[test]
    fn reject_dialog_opens_with_empty_input() {
        let mut screen = RevisaoScreen::new();
        screen.set_escritura(sample());
        screen.reject_input.insert_char('x');
        screen.open_reject_dialog();
        assert!(screen.show_reject_dialog);
        assert!(screen.reject_input.is_empty());
        screen.close_reject_dialog();
        assert!(!screen.show_reject_dialog);
    }

    #[test]
    fn load_failures_clear_the_record() {
        let mut screen = RevisaoScreen::new();
        screen.set_escritura(sample());
        screen.mark_not_found();
        assert_eq!(screen.state, LoadState::NotFound);
        assert!(screen.escritura.is_none());

        screen.set_escritura(sample());
        screen.mark_missing_id();
        assert_eq!(screen.state, LoadState::MissingId);
        assert!(screen.escritura.is_none());
    }
}
