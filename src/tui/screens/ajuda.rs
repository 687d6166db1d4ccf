//! Help screen with the full keybinding reference

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

pub struct AjudaScreen {
    pub scroll_offset: usize,
}

impl AjudaScreen {
    pub fn new() -> Self {
        Self { scroll_offset: 0 }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let lines: Vec<Line> = help_lines()
            .into_iter()
            .skip(self.scroll_offset)
            .collect();

        let help = Paragraph::new(lines).block(
            Block::default()
                .title("Ajuda - Cartório Digital")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );
        f.render_widget(help, chunks[0]);

        let instructions = Paragraph::new("↑/↓: Rolar | Esc: Voltar | q: Sair")
            .style(Styles::info())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(instructions, chunks[1]);
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), Styles::title()))
}

fn entry(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", key), Styles::info()),
        Span::raw(action.to_string()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        section("Geral"),
        entry("F1", "Mostrar/ocultar ajuda rápida"),
        entry("Ctrl+C", "Sair do programa"),
        Line::from(""),
        section("Painel de Escrituras"),
        entry("↑/↓", "Selecionar escritura"),
        entry("←/→", "Página anterior/próxima"),
        entry("Home/End", "Primeira/última página"),
        entry("Enter", "Abrir revisão da escritura selecionada"),
        entry("n", "Nova escritura"),
        entry("r", "Recarregar lista"),
        entry("h", "Abrir esta tela de ajuda"),
        entry("q", "Sair"),
        Line::from(""),
        section("Nova Escritura"),
        entry("Tab/Shift+Tab", "Próximo/campo anterior"),
        entry("↑/↓", "Navegar entre campos"),
        entry("Enter", "Abrir seleção de tipo / confirmar"),
        entry("a", "Anexar documento PDF (no campo Documentos)"),
        entry("←/→", "Selecionar anexo (no campo Documentos)"),
        entry("Delete", "Remover anexo selecionado"),
        entry("Ctrl+E", "Gerar Escritura com IA"),
        entry("Esc", "Cancelar e voltar ao painel"),
        Line::from(""),
        section("Revisão de Escritura"),
        entry("↑/↓", "Rolar o conteúdo"),
        entry("e", "Editar conteúdo"),
        entry("Ctrl+S", "Salvar edição"),
        entry("a", "Aprovar escritura"),
        entry("r", "Rejeitar escritura (pede o motivo)"),
        entry("b", "Baixar como arquivo de texto"),
        entry("Esc", "Voltar ao painel"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_up_stops_at_zero() {
        let mut screen = AjudaScreen::new();
        screen.scroll_up();
        assert_eq!(screen.scroll_offset, 0);
        screen.scroll_down();
        screen.scroll_down();
        screen.scroll_up();
        assert_eq!(screen.scroll_offset, 1);
    }
}
