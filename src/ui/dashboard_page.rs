use crate::ui::{widgets, Ctx};
use adw::prelude::*;
use gtk4 as gtk;
use introbook::dashboard::{surname_tally, totals, SurnameSlice};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

pub struct DashboardPage {
    ctx: Ctx,
    slices: Rc<RefCell<Vec<SurnameSlice>>>,
    root: gtk::ScrolledWindow,
    families: gtk::Label,
    members: gtk::Label,
    chart: gtk::DrawingArea,
    legend: gtk::ListBox,
}

fn rgb(hex: &str) -> (f64, f64, f64) {
    let channel = |i: usize| {
        hex.get(i..i + 2).and_then(|h| u8::from_str_radix(h, 16).ok()).map(|v| v as f64 / 255.0).unwrap_or(0.8)
    };
    (channel(1), channel(3), channel(5))
}

fn draw_pie(cr: &gtk::cairo::Context, width: i32, height: i32, slices: &[SurnameSlice]) {
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return;
    }
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = cx.min(cy) - 8.0;
    let mut start = -PI / 2.0;
    for slice in slices {
        let sweep = 2.0 * PI * slice.value as f64 / total as f64;
        let (r, g, b) = rgb(slice.color);
        cr.set_source_rgb(r, g, b);
        cr.move_to(cx, cy);
        cr.arc(cx, cy, radius, start, start + sweep);
        cr.close_path();
        if let Err(e) = cr.fill() {
            log::debug!("chart fill failed: {}", e);
            return;
        }
        start += sweep;
    }
}

impl DashboardPage {
    pub fn new(ctx: &Ctx) -> Rc<Self> {
        let content = widgets::padded_box(gtk::Orientation::Vertical, 14);
        content.append(&widgets::heading(&ctx.t("dashboard"), "title-1"));

        let numbers = gtk::Box::new(gtk::Orientation::Horizontal, 24);
        let families = widgets::heading("", "title-3");
        let members = widgets::heading("", "title-3");
        numbers.append(&families);
        numbers.append(&members);
        content.append(&numbers);

        content.append(&widgets::heading("Families by surname", "title-4"));
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 18);
        let chart = gtk::DrawingArea::new();
        chart.set_content_width(280);
        chart.set_content_height(280);
        row.append(&chart);
        let legend = widgets::boxed_list();
        legend.set_hexpand(true);
        legend.set_valign(gtk::Align::Start);
        row.append(&legend);
        content.append(&row);

        let slices = Rc::new(RefCell::new(Vec::new()));
        {
            let slices = slices.clone();
            chart.set_draw_func(move |_, cr, w, h| draw_pie(cr, w, h, &slices.borrow()));
        }

        Rc::new(Self {
            ctx: ctx.clone(),
            slices,
            root: widgets::scrolled(&content),
            families,
            members,
            chart,
            legend,
        })
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn render(&self) {
        let slices = self.slices.borrow();
        widgets::clear_list(&self.legend);
        for slice in slices.iter() {
            let line = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            line.set_margin_top(4);
            line.set_margin_bottom(4);
            line.set_margin_start(8);
            line.set_margin_end(8);
            let swatch = gtk::Label::new(None);
            swatch.set_markup(&format!("<span foreground=\"{}\">●</span>", slice.color));
            line.append(&swatch);
            let name = gtk::Label::new(Some(&slice.name));
            name.set_hexpand(true);
            name.set_halign(gtk::Align::Start);
            line.append(&name);
            line.append(&widgets::dim_label(&slice.value.to_string()));
            self.legend.append(&line);
        }
        self.chart.queue_draw();
    }

    pub fn refresh(self: &Rc<Self>) {
        let page = self.clone();
        crate::app::call(
            move |c| async move { c.all_families().await },
            move |res| match res {
                Ok(families) => {
                    let t = totals(&families);
                    page.families.set_label(&format!("{} families", t.families));
                    page.members.set_label(&format!("{} people", t.members));
                    *page.slices.borrow_mut() = surname_tally(&families);
                    page.render();
                }
                Err(e) => {
                    log::warn!("family analytics failed: {}", e);
                    page.ctx.toast(&e.user_message());
                }
            },
        );
    }
}
