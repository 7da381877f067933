use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use tokio::sync::mpsc;

use crate::auth::session::viewer_key;
use crate::services::notify::{self, ConnectionMap};

/// WebSocket upgrade handler. Pushes `action_update` messages for this viewer.
pub async fn ws_connect(
    req: HttpRequest,
    body: web::Payload,
    session: Session,
    conn_map: web::Data<ConnectionMap>,
) -> Result<HttpResponse, actix_web::Error> {
    let viewer = viewer_key(&session)?;

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    notify::register(&conn_map, &viewer, tx);

    let conn_map = conn_map.into_inner();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                Some(msg) = rx.recv() => {
                    if ws_session.text(msg).await.is_err() {
                        break;
                    }
                }
                msg = msg_stream.recv() => {
                    if ends_session(&msg) {
                        break;
                    }
                    // Actions arrive as form posts
                    if let Some(Ok(Message::Ping(bytes))) = msg {
                        if ws_session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                }
                else => break,
            }
        }

        drop(rx);
        notify::prune(&conn_map, &viewer);
    });

    Ok(response)
}

/// A closed stream, a protocol error or a Close frame ends the session.
fn ends_session<E>(msg: &Option<Result<Message, E>>) -> bool {
    matches!(msg, None | Some(Err(_)) | Some(Ok(Message::Close(_))))
}
