//! Stock-adjustment editor: scan (or type) batch codes, key in counted
//! quantities, submit. The scan loop is driven by the [`ScanSession`] state
//! machine; the camera teardown runs on every exit path, including an
//! unmount mid-scan, via `on_cleanup`.

use contracts::alloc::assembler::{
    assemble_adjustment, generate_code, AdjustmentHeader, CountLine, DocumentKind,
};
use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use crate::domain::adjustment::api;
use crate::domain::batch::api as batch_api;
use crate::shared::date_utils::{datetime_local_value, parse_datetime_local};
use crate::shared::icons::icon;
use crate::shared::number_format::format_quantity;
use crate::shared::runtime;
use crate::shared::scanner::{camera, CameraScanner, ScanOutcome, ScanSession};
use crate::shared::toast::{use_toast, ToastService};
use crate::system::auth::context::use_auth;

/// Look up a scanned/typed code and append the batch to the count list.
///
/// Two independent duplicate guards: the session's added-code set and a
/// linear scan of the current rows. A failed lookup leaves the list
/// unchanged.
async fn lookup_and_add(
    code: String,
    counts: RwSignal<Vec<CountLine>>,
    session: RwSignal<ScanSession>,
    toast: ToastService,
) {
    let code = code.trim().to_string();
    if code.is_empty() {
        return;
    }
    let already = session
        .try_with_untracked(|s| s.already_added(&code))
        .unwrap_or(true)
        || counts
            .try_with_untracked(|list| list.iter().any(|c| c.batch_code == code))
            .unwrap_or(true);
    if already {
        toast.info("Lô hàng đã được thêm trước đó!");
        return;
    }

    match batch_api::fetch_by_code(&code).await {
        Ok(batch) => {
            // re-check with the canonical code from the response
            let duplicate = session
                .try_with_untracked(|s| s.already_added(&batch.batch_code))
                .unwrap_or(true)
                || counts
                    .try_with_untracked(|list| list.iter().any(|c| c.batch_code == batch.batch_code))
                    .unwrap_or(true);
            if duplicate {
                toast.info("Lô hàng đã được thêm trước đó!");
                return;
            }
            let _ = session.try_update(|s| s.mark_added(&batch.batch_code));
            let line = CountLine {
                batch_id: batch.id,
                batch_code: batch.batch_code.clone(),
                product_name: batch.product_name.unwrap_or_default(),
                location_name: batch.location_name.unwrap_or_default(),
                system_quantity: batch.remaining_quantity,
                actual_quantity: None,
            };
            let _ = counts.try_update(|list| list.push(line));
            toast.success(format!("Đã thêm lô hàng: {}", batch.batch_code));
        }
        Err(e) => {
            log::debug!("batch lookup failed for {}: {}", code, e);
            toast.warning(format!("Không tìm thấy lô hàng với mã {}", code));
        }
    }
}

#[component]
pub fn AdjustmentEditor(on_saved: Rc<dyn Fn(())>, on_cancel: Rc<dyn Fn(())>) -> impl IntoView {
    let toast = use_toast();
    let (auth_state, _) = use_auth();

    let counts = RwSignal::new(Vec::<CountLine>::new());
    let session = RwSignal::new(ScanSession::new());
    let camera_store = StoredValue::new_local(CameraScanner::new());
    let video_ref: NodeRef<html::Video> = NodeRef::new();

    let (code, set_code) = signal(generate_code(
        DocumentKind::Adjustment,
        runtime::now_local().date(),
        runtime::random_code_suffix(),
    ));
    let (date_input, set_date_input) = signal(datetime_local_value(&runtime::now_local()));
    let (manual_code, set_manual_code) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let scanning = move || session.with(|s| s.is_active());

    let start_scan = move || {
        let started = session.try_update(|s| s.begin_start()).unwrap_or(false);
        if !started {
            return;
        }
        spawn_local(async move {
            // give the <video> element a tick to render
            TimeoutFuture::new(50).await;
            let Some(video) = video_ref.get_untracked() else {
                toast.error("Lỗi khi khởi động camera!");
                let _ = session.try_update(|s| s.fail_start());
                return;
            };
            let detector = match camera::BarcodeDetector::new() {
                Ok(d) => d,
                Err(_) => {
                    toast.error("Trình duyệt không hỗ trợ quét mã vạch!");
                    let _ = session.try_update(|s| s.fail_start());
                    return;
                }
            };
            let cam = camera_store.get_value();
            if let Err(e) = cam.start(&video).await {
                toast.error(e);
                let _ = session.try_update(|s| s.fail_start());
                cam.stop(Some(&video));
                return;
            }
            let _ = session.try_update(|s| s.stream_ready());

            loop {
                if !session.try_with_untracked(|s| s.is_active()).unwrap_or(false) {
                    break;
                }
                if let Some(scanned) = camera::decode_frame(&detector, &video).await {
                    let outcome = session
                        .try_update(|s| s.offer(&scanned, runtime::now_ms()))
                        .unwrap_or(ScanOutcome::NotScanning);
                    match outcome {
                        ScanOutcome::Accepted => {
                            toast.success(format!("Đã quét mã lô: {}", scanned));
                            lookup_and_add(scanned, counts, session, toast).await;
                            let _ = session.try_update(|s| s.finish_processing());
                        }
                        ScanOutcome::Duplicate => {
                            toast.info("Lô hàng đã được thêm trước đó!");
                        }
                        ScanOutcome::Cooldown | ScanOutcome::NotScanning => {}
                    }
                }
                TimeoutFuture::new(300).await;
            }
            // loop exited (stop or unmount): release the device
            cam.stop(None);
        });
    };

    let stop_scan = move || {
        session.update(|s| s.stop());
        camera_store.update_value(|cam| cam.stop(video_ref.get_untracked().as_ref()));
    };

    // mandatory scoped release: unmounting mid-scan still frees the camera
    on_cleanup(move || {
        let _ = session.try_update(|s| s.stop());
        let _ = camera_store.try_update_value(|cam| cam.stop(None));
    });

    let add_manual = move || {
        let code = manual_code.get();
        set_manual_code.set(String::new());
        spawn_local(async move {
            lookup_and_add(code, counts, session, toast).await;
        });
    };

    let change_actual = move |batch_code: String, raw: String| {
        let parsed = raw.parse::<f64>().ok().filter(|v| *v >= 0.0);
        counts.update(|list| {
            if let Some(line) = list.iter_mut().find(|c| c.batch_code == batch_code) {
                line.actual_quantity = parsed;
            }
        });
    };

    let remove_line = move |batch_code: String| {
        session.update(|s| s.forget(&batch_code));
        counts.update(|list| list.retain(|c| c.batch_code != batch_code));
        toast.info(format!("Đã xóa lô hàng: {}", batch_code));
    };

    let submit = {
        let on_saved = on_saved.clone();
        move || {
            if submitting.get() {
                return;
            }
            let Some(date) = parse_datetime_local(&date_input.get()) else {
                toast.warning("Ngày điều chỉnh không hợp lệ");
                return;
            };
            let header = AdjustmentHeader {
                code: code.get(),
                date,
                created_by: auth_state.get().user_id().unwrap_or_default(),
            };
            let payload = match assemble_adjustment(
                &header,
                &counts.get(),
                runtime::random_code_suffix(),
            ) {
                Ok(payload) => payload,
                Err(e) => {
                    toast.warning(e.to_string());
                    return;
                }
            };

            // the scanner must not outlive the editor
            stop_scan();

            set_submitting.set(true);
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match api::create(&payload).await {
                    Ok(_) => {
                        toast.success("Tạo phiếu điều chỉnh tồn kho thành công!");
                        (on_saved)(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                set_submitting.set(false);
            });
        }
    };

    let close = {
        let on_cancel = on_cancel.clone();
        move || {
            // stop synchronously before the modal goes away
            stop_scan();
            (on_cancel)(());
        }
    };

    view! {
        <div class="editor">
            <div class="editor__header">
                <h3>{"Tạo phiếu điều chỉnh tồn kho"}</h3>
            </div>

            <div class="editor__body">
                <div class="editor__sidebar">
                    <div class="form-group">
                        <label for="adjustment-code">{"Mã phiếu"}</label>
                        <input
                            type="text"
                            id="adjustment-code"
                            prop:value=move || code.get()
                            on:input=move |ev| set_code.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="adjustment-date">{"Ngày điều chỉnh"}</label>
                        <input
                            type="datetime-local"
                            id="adjustment-date"
                            prop:value=move || date_input.get()
                            on:input=move |ev| set_date_input.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="stat">
                        <div class="stat__title">{"Tổng số lô đã quét"}</div>
                        <div class="stat__value">{move || counts.get().len()}</div>
                    </div>
                    <div class="stat">
                        <div class="stat__title">{"Lô chưa nhập số lượng"}</div>
                        <div class="stat__value">
                            {move || counts.get().iter().filter(|c| c.actual_quantity.is_none()).count()}
                        </div>
                    </div>
                </div>

                <div class="editor__main">
                    <Show
                        when=scanning
                        fallback=move || view! {
                            <div class="scan-controls">
                                <input
                                    type="text"
                                    placeholder="Nhập hoặc quét mã lô"
                                    prop:value=move || manual_code.get()
                                    on:input=move |ev| set_manual_code.set(event_target_value(&ev))
                                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            ev.prevent_default();
                                            add_manual();
                                        }
                                    }
                                />
                                <button class="button button--primary" on:click=move |_| start_scan()>
                                    {icon("barcode")}
                                    {"Quét"}
                                </button>
                            </div>
                        }
                    >
                        <div class="scan-area">
                            <video
                                node_ref=video_ref
                                class="scan-area__video"
                                autoplay
                                playsinline
                                muted
                            ></video>
                            <button class="button button--danger" on:click=move |_| stop_scan()>
                                {icon("stop")}
                                {"Dừng quét"}
                            </button>
                        </div>
                    </Show>

                    <div class="table">
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">{"Mã lô"}</th>
                                    <th class="table__header-cell">{"Sản phẩm"}</th>
                                    <th class="table__header-cell">{"Tồn hệ thống"}</th>
                                    <th class="table__header-cell">{"Thực tế"}</th>
                                    <th class="table__header-cell">{"Vị trí"}</th>
                                    <th class="table__header-cell"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let list = counts.get();
                                    if list.is_empty() {
                                        return view! {
                                            <tr><td class="table__cell" colspan="6">
                                                {"Chưa có lô hàng nào được quét"}
                                            </td></tr>
                                        }.into_any();
                                    }
                                    list.into_iter().map(|line| {
                                        let code_for_change = line.batch_code.clone();
                                        let code_for_remove = line.batch_code.clone();
                                        view! {
                                            <tr class="table__row">
                                                <td class="table__cell"><span class="tag tag--blue">{line.batch_code.clone()}</span></td>
                                                <td class="table__cell">{line.product_name.clone()}</td>
                                                <td class="table__cell">{format_quantity(line.system_quantity)}</td>
                                                <td class="table__cell">
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        step="any"
                                                        placeholder="Nhập số lượng"
                                                        prop:value=line.actual_quantity.map(|v| v.to_string()).unwrap_or_default()
                                                        on:change=move |ev| {
                                                            change_actual(code_for_change.clone(), event_target_value(&ev));
                                                        }
                                                    />
                                                </td>
                                                <td class="table__cell">{line.location_name.clone()}</td>
                                                <td class="table__cell">
                                                    <button
                                                        class="button button--small button--danger"
                                                        on:click=move |_| remove_line(code_for_remove.clone())
                                                    >
                                                        {icon("delete")}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view().into_any()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| submit()
                    disabled=move || submitting.get()
                >
                    {icon("save")}
                    {move || if submitting.get() { "Đang lưu..." } else { "Lưu phiếu" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| close()>
                    {icon("cancel")}
                    {"Hủy"}
                </button>
            </div>
        </div>
    }
}
