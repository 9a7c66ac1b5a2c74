//! Win32 overlay window.
//!
//! A full-screen, topmost, undecorated layered window. Black is the colour key,
//! so every pixel left at the cleared colour is both invisible and passes
//! mouse input to whatever is underneath; only the painted panel receives
//! clicks. Drawing goes to a memory DC and reaches the screen in one `BitBlt`.

use tracing::{debug, info};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, RECT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreateFontIndirectW, CreatePen,
    CreateSolidBrush, DeleteDC, DeleteObject, FillRect, GetDC, GetStockObject,
    GetTextExtentPoint32W, HBITMAP, HBRUSH, HDC, HFONT, HGDIOBJ, LOGFONTW, NULL_BRUSH, PS_SOLID,
    Rectangle, ReleaseDC, SRCCOPY, SelectObject, SetBkMode, SetTextColor, TRANSPARENT, TextOutW,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetSystemMetrics, HMENU,
    IDC_ARROW, LWA_COLORKEY, LoadCursorW, MSG, PM_REMOVE, PeekMessageW, PostQuitMessage,
    RegisterClassW, SM_CXSCREEN, SM_CYSCREEN, SW_SHOW, SetLayeredWindowAttributes, ShowWindow,
    TranslateMessage, UnregisterClassW, WM_DESTROY, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
    WM_QUIT, WNDCLASSW, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::{HSTRING, PCWSTR};

use super::{
    Canvas, FontCache, OverlayHost, PanelState, Point, PointerEvent, PumpStatus, Rect, Rgb,
    TextStyle,
};
use crate::error::{Error, Result};

/// Colour treated as fully transparent by the compositor
pub const COLOR_KEY: Rgb = Rgb::BLACK;

const FONT_FACE: &str = "Segoe UI";
const FONT_WEIGHT_BOLD: i32 = 700;
const MK_LBUTTON: usize = 0x0001;

/// Window parameters for [`OverlaySurface::create`]
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Window title, also used as the window class name
    pub title: String,
    /// Defaults to the primary screen size
    pub size: Option<(i32, i32)>,
    pub panel_origin: Point,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: "Surf Box".to_string(),
            size: None,
            panel_origin: super::DEFAULT_PANEL_ORIGIN,
        }
    }
}

pub struct OverlaySurface {
    hwnd: HWND,
    instance: HINSTANCE,
    class_name: HSTRING,
    window_dc: HDC,
    mem_dc: HDC,
    bitmap: HBITMAP,
    previous_bitmap: HGDIOBJ,
    key_brush: HBRUSH,
    width: i32,
    height: i32,
    fonts: FontCache<HFONT>,
    panel: PanelState,
}

impl OverlaySurface {
    pub fn create(config: &OverlayConfig) -> Result<Self> {
        let (width, height) = config.size.unwrap_or_else(|| {
            // SAFETY: GetSystemMetrics has no preconditions.
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
        });

        // SAFETY: a null module name returns the handle of the current executable.
        let instance: HINSTANCE = unsafe { GetModuleHandleW(PCWSTR::null()) }
            .map_err(|e| Error::Window(format!("GetModuleHandleW: {}", e.message())))?
            .into();

        let class_name = HSTRING::from(config.title.as_str());
        let wc = WNDCLASSW {
            lpfnWndProc: Some(wnd_proc),
            hInstance: instance,
            lpszClassName: PCWSTR(class_name.as_ptr()),
            // SAFETY: loading a predefined system cursor.
            hCursor: unsafe { LoadCursorW(HINSTANCE::default(), IDC_ARROW) }.unwrap_or_default(),
            ..Default::default()
        };

        // SAFETY: wc and the class name it points to outlive the call.
        if unsafe { RegisterClassW(&wc) } == 0 {
            return Err(Error::Window(format!(
                "RegisterClassW failed for {}",
                config.title
            )));
        }

        // SAFETY: the class was registered above; strings outlive the call.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
                &class_name,
                &HSTRING::from(config.title.as_str()),
                WS_POPUP,
                0,
                0,
                width,
                height,
                HWND::default(),
                HMENU::default(),
                instance,
                None,
            )
        }
        .map_err(|e| Error::Window(format!("CreateWindowExW: {}", e.message())))?;

        // Constructed before any further fallible call so Drop cleans up on error.
        let mut surface = Self {
            hwnd,
            instance,
            class_name,
            window_dc: HDC::default(),
            mem_dc: HDC::default(),
            bitmap: HBITMAP::default(),
            previous_bitmap: HGDIOBJ::default(),
            key_brush: HBRUSH::default(),
            width,
            height,
            fonts: FontCache::new(),
            panel: PanelState::new(config.panel_origin),
        };

        // SAFETY: hwnd is a live layered window owned by this thread.
        unsafe {
            SetLayeredWindowAttributes(hwnd, COLORREF(COLOR_KEY.to_colorref()), 0, LWA_COLORKEY)
        }
        .map_err(|e| Error::Window(format!("SetLayeredWindowAttributes: {}", e.message())))?;

        // SAFETY: plain GDI object creation against a live window.
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);

            surface.window_dc = GetDC(hwnd);
            if surface.window_dc.is_invalid() {
                return Err(Error::Gdi("GetDC"));
            }

            surface.mem_dc = CreateCompatibleDC(surface.window_dc);
            if surface.mem_dc.is_invalid() {
                return Err(Error::Gdi("CreateCompatibleDC"));
            }

            surface.bitmap = CreateCompatibleBitmap(surface.window_dc, width, height);
            if surface.bitmap.is_invalid() {
                return Err(Error::Gdi("CreateCompatibleBitmap"));
            }
            surface.previous_bitmap = SelectObject(surface.mem_dc, HGDIOBJ(surface.bitmap.0));

            surface.key_brush = CreateSolidBrush(COLORREF(COLOR_KEY.to_colorref()));
            if surface.key_brush.is_invalid() {
                return Err(Error::Gdi("CreateSolidBrush"));
            }
        }

        info!("Overlay window created ({}x{})", width, height);
        Ok(surface)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn font(&mut self, size: i32) -> Result<HFONT> {
        self.fonts.get_or_create(size, create_font).copied()
    }
}

fn create_font(size: i32) -> Result<HFONT> {
    let mut logfont = LOGFONTW {
        lfHeight: size,
        lfWeight: FONT_WEIGHT_BOLD,
        ..Default::default()
    };
    for (dst, src) in logfont
        .lfFaceName
        .iter_mut()
        .zip(FONT_FACE.encode_utf16().take(31))
    {
        *dst = src;
    }

    // SAFETY: logfont is fully initialised and outlives the call.
    let font = unsafe { CreateFontIndirectW(&logfont) };
    if font.is_invalid() {
        return Err(Error::Gdi("CreateFontIndirectW"));
    }
    Ok(font)
}

fn to_rect(rect: Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

fn pointer_event(message: u32, wparam: WPARAM, lparam: LPARAM) -> Option<PointerEvent> {
    let at = Point::from_lparam(lparam.0);
    match message {
        WM_LBUTTONDOWN => Some(PointerEvent::Down(at)),
        WM_MOUSEMOVE => Some(PointerEvent::Move {
            at,
            primary_held: wparam.0 & MK_LBUTTON != 0,
        }),
        WM_LBUTTONUP => Some(PointerEvent::Up(at)),
        _ => None,
    }
}

/// Mouse messages are consumed by the pump before dispatch; the procedure
/// only has to turn window destruction into a quit message.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_DESTROY => {
            // SAFETY: called on the thread that owns the message loop.
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        WM_LBUTTONDOWN | WM_MOUSEMOVE | WM_LBUTTONUP => LRESULT(0),
        // SAFETY: forwarding the unmodified message to the default procedure.
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

impl Canvas for OverlaySurface {
    fn clear(&mut self) -> Result<()> {
        let rect = to_rect(Rect::new(0, 0, self.width, self.height));
        // SAFETY: mem_dc and key_brush are valid for the lifetime of self.
        if unsafe { FillRect(self.mem_dc, &rect, self.key_brush) } == 0 {
            return Err(Error::Gdi("FillRect"));
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        let rect = to_rect(rect);
        // SAFETY: the brush is created, used and deleted within this block.
        unsafe {
            let brush = CreateSolidBrush(COLORREF(color.to_colorref()));
            if brush.is_invalid() {
                return Err(Error::Gdi("CreateSolidBrush"));
            }
            let filled = FillRect(self.mem_dc, &rect, brush);
            let _ = DeleteObject(HGDIOBJ(brush.0));
            if filled == 0 {
                return Err(Error::Gdi("FillRect"));
            }
        }
        Ok(())
    }

    fn draw_box(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        // SAFETY: the pen is selected, used, deselected and deleted within this block.
        unsafe {
            let pen = CreatePen(PS_SOLID, 1, COLORREF(color.to_colorref()));
            if pen.is_invalid() {
                return Err(Error::Gdi("CreatePen"));
            }
            let old_pen = SelectObject(self.mem_dc, HGDIOBJ(pen.0));
            let old_brush = SelectObject(self.mem_dc, GetStockObject(NULL_BRUSH));
            let drawn = Rectangle(self.mem_dc, rect.x, rect.y, rect.right(), rect.bottom());
            SelectObject(self.mem_dc, old_brush);
            SelectObject(self.mem_dc, old_pen);
            let _ = DeleteObject(HGDIOBJ(pen.0));
            if !drawn.as_bool() {
                return Err(Error::Gdi("Rectangle"));
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<()> {
        let font = self.font(style.size)?;
        let wide: Vec<u16> = text.encode_utf16().collect();

        // SAFETY: the font is owned by the cache; the previous font is restored.
        unsafe {
            let old_font = SelectObject(self.mem_dc, HGDIOBJ(font.0));
            SetTextColor(self.mem_dc, COLORREF(style.color.to_colorref()));
            SetBkMode(self.mem_dc, TRANSPARENT);

            let mut origin = at;
            if style.centered {
                let mut extent = SIZE::default();
                if GetTextExtentPoint32W(self.mem_dc, &wide, &mut extent).as_bool() {
                    origin = at.offset(-extent.cx / 2, -extent.cy / 2);
                }
            }

            let drawn = TextOutW(self.mem_dc, origin.x, origin.y, &wide);
            SelectObject(self.mem_dc, old_font);
            if !drawn.as_bool() {
                return Err(Error::Gdi("TextOutW"));
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        // SAFETY: both DCs are valid and the same size.
        unsafe {
            BitBlt(
                self.window_dc,
                0,
                0,
                self.width,
                self.height,
                self.mem_dc,
                0,
                0,
                SRCCOPY,
            )
        }
        .map_err(|_| Error::Gdi("BitBlt"))
    }
}

impl OverlayHost for OverlaySurface {
    fn pump_events(&mut self) -> Result<PumpStatus> {
        let mut msg = MSG::default();

        // SAFETY: msg is a valid out-parameter; messages are dispatched on the owning thread.
        while unsafe { PeekMessageW(&mut msg, HWND::default(), 0, 0, PM_REMOVE) }.as_bool() {
            if msg.message == WM_QUIT {
                debug!("Overlay window destroyed");
                return Ok(PumpStatus::Quit);
            }

            if msg.hwnd == self.hwnd
                && let Some(event) = pointer_event(msg.message, msg.wParam, msg.lParam)
            {
                self.panel.handle(event);
            }

            // SAFETY: msg was just filled by PeekMessageW on this thread.
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        Ok(PumpStatus::Continue)
    }

    fn panel(&self) -> &PanelState {
        &self.panel
    }
}

impl Drop for OverlaySurface {
    fn drop(&mut self) {
        // SAFETY: every handle was created by this surface and is released once;
        // default (null) handles are skipped.
        unsafe {
            for font in self.fonts.drain() {
                let _ = DeleteObject(HGDIOBJ(font.0));
            }
            if !self.key_brush.is_invalid() {
                let _ = DeleteObject(HGDIOBJ(self.key_brush.0));
            }
            if !self.mem_dc.is_invalid() {
                if !self.previous_bitmap.is_invalid() {
                    SelectObject(self.mem_dc, self.previous_bitmap);
                }
                let _ = DeleteDC(self.mem_dc);
            }
            if !self.bitmap.is_invalid() {
                let _ = DeleteObject(HGDIOBJ(self.bitmap.0));
            }
            if !self.window_dc.is_invalid() {
                ReleaseDC(self.hwnd, self.window_dc);
            }
            // Fails harmlessly if the window was already destroyed by the user.
            let _ = DestroyWindow(self.hwnd);
            let _ = UnregisterClassW(&self.class_name, self.instance);
        }
    }
}
