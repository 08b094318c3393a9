//! C targeting the ESP-IDF `esp_http_server` component.

use super::{
    document::{Dialect, Include, Section, StartupRoutine},
    escaper,
    route_table::{DataDeclaration, EmbeddedData, HandlerDefinition, RouteEntry},
};

pub const ENTRY_POINT: &str = "httpd_handle_t start_webserver(uint32_t port)";

const INDENT: &str = "    ";
const BYTES_PER_LINE: usize = 16;

pub struct EspIdf;

/// Bytes above 0x7f are cast so a signed `char` target takes them without a conversion
/// warning.
fn byte_constant(byte: u8) -> String {
    if byte > 0x7f {
        format!("(char)0x{byte:02x}")
    } else {
        format!("0x{byte:02x}")
    }
}

impl EspIdf {
    fn data(decl: &DataDeclaration, out: &mut Vec<u8>) {
        match &decl.data {
            EmbeddedData::Literal(escaped) => {
                out.extend_from_slice(format!("const char {}[] = \"", decl.symbol).as_bytes());
                out.extend_from_slice(escaped);
                out.extend_from_slice(b"\";\n");
            }
            EmbeddedData::Bytes(bytes) => {
                line(out, format!("const char {}[] = {{", decl.symbol));
                for chunk in bytes.chunks(BYTES_PER_LINE) {
                    let hex = chunk
                        .iter()
                        .map(|&b| byte_constant(b))
                        .collect::<Vec<_>>()
                        .join(", ");
                    line(out, format!("{INDENT}{hex},"));
                }
                line(out, "};");
            }
        }
    }

    fn handler(handler: &HandlerDefinition, out: &mut Vec<u8>) {
        line(
            out,
            format!("esp_err_t {}(httpd_req_t *request) {{", handler.symbol),
        );
        line(
            out,
            format!(
                "{INDENT}return httpd_resp_send(request, {data}, sizeof({data}));",
                data = handler.data_symbol
            ),
        );
        line(out, "}");
        line(out, "");
    }

    fn route(route: &RouteEntry, out: &mut Vec<u8>) {
        line(out, format!("httpd_uri_t {} = {{", route.symbol));
        line(
            out,
            format!("{INDENT}.uri = \"{}\",", escaper::escape_str(&route.uri)),
        );
        line(out, format!("{INDENT}.method = HTTP_GET,"));
        line(out, format!("{INDENT}.handler = {}", route.handler));
        line(out, "};");
        line(out, "");
    }

    fn startup(startup: &StartupRoutine, out: &mut Vec<u8>) {
        line(out, format!("{ENTRY_POINT} {{"));
        line(out, format!("{INDENT}httpd_handle_t server = NULL;"));
        line(
            out,
            format!("{INDENT}httpd_config_t config = HTTPD_DEFAULT_CONFIG();"),
        );
        line(out, format!("{INDENT}config.server_port = port;"));
        line(
            out,
            format!("{INDENT}config.max_uri_handlers = {};", startup.capacity),
        );
        line(out, "");
        line(out, format!("{INDENT}// Start the httpd server"));
        line(
            out,
            format!(
                "{INDENT}ESP_LOGI(TAG, \"Starting server on port: '%d'\", config.server_port);"
            ),
        );
        line(
            out,
            format!("{INDENT}if (httpd_start(&server, &config) == ESP_OK) {{"),
        );
        for route in &startup.routes {
            line(
                out,
                format!("{INDENT}{INDENT}httpd_register_uri_handler(server, &{route});"),
            );
        }
        line(out, format!("{INDENT}{INDENT}return server;"));
        line(out, format!("{INDENT}}}"));
        line(out, "");
        line(out, format!("{INDENT}ESP_LOGI(TAG, \"Error starting server!\");"));
        line(out, format!("{INDENT}return NULL;"));
        line(out, "}");
    }
}

fn line<S>(out: &mut Vec<u8>, text: S)
where
    S: AsRef<str>,
{
    out.extend_from_slice(text.as_ref().as_bytes());
    out.push(b'\n');
}

impl Dialect for EspIdf {
    fn render_section(&self, section: &Section, out: &mut Vec<u8>) {
        match section {
            Section::GuardOpen(guard) => {
                line(out, format!("#ifndef {guard}"));
                line(out, format!("#define {guard}"));
            }
            Section::GuardClose => line(out, "#endif"),
            Section::Include(Include::Local(header)) => {
                line(out, format!("#include \"{}\"", escaper::escape_str(header)))
            }
            Section::Include(Include::System(header)) => line(out, format!("#include <{header}>")),
            Section::DefineString { name, value } => line(
                out,
                format!("#define {name} \"{}\"", escaper::escape_str(value)),
            ),
            Section::Comment(text) => line(out, format!("// {text}")),
            Section::Blank => line(out, ""),
            Section::EntryPoint => line(out, format!("{ENTRY_POINT};")),
            Section::Data(decl) => Self::data(decl, out),
            Section::Handler(handler) => Self::handler(handler, out),
            Section::Route(route) => Self::route(route, out),
            Section::Startup(startup) => Self::startup(startup, out),
        }
    }
}
