//! Print Dispatcher - 查打印机配置、建任务、广播
//!
//! 引擎内没有任何打印传输依赖：任务发布到一个 broadcast 通道，
//! 由外部打印桥订阅并送达物理打印机。broadcast 边界之外的可靠性
//! （重试、落盘）属于打印桥，不属于本引擎。

use crate::catalog::PrinterRegistry;
use crate::printing::types::{PrintJob, TicketSnapshot, TicketType};
use shared::order::{Order, StationTicket};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// 收银打印机的固定角色名
pub const CASHIER_ROLE: &str = "CASHIER";

#[derive(Debug, Error)]
pub enum DispatchError {
    /// 角色没有对应的打印机配置；上报调用方，不重试
    #[error("No printer configured for role: {0}")]
    PrinterNotConfigured(String),

    /// 通道上没有任何订阅者（打印桥未接入）
    #[error("Print channel has no subscribers: {0}")]
    ChannelClosed(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// 打印派发器
pub struct PrintDispatcher {
    registry: Arc<dyn PrinterRegistry>,
    job_tx: broadcast::Sender<PrintJob>,
}

impl PrintDispatcher {
    pub fn new(registry: Arc<dyn PrinterRegistry>, channel_capacity: usize) -> Self {
        let (job_tx, _) = broadcast::channel(channel_capacity);
        Self { registry, job_tx }
    }

    /// 打印桥从这里接入任务流
    pub fn subscribe(&self) -> broadcast::Receiver<PrintJob> {
        self.job_tx.subscribe()
    }

    /// 派发收银小票（角色 CASHIER）
    pub fn dispatch_cashier_ticket(&self, order: &Order) -> DispatchResult<PrintJob> {
        let snapshot = TicketSnapshot::from_order(order);
        self.dispatch(CASHIER_ROLE, TicketType::Cashier, None, snapshot)
    }

    /// 派发区域工单票（角色 = 区域 id，大写匹配）
    pub fn dispatch_station_ticket(
        &self,
        order: &Order,
        ticket: &StationTicket,
    ) -> DispatchResult<PrintJob> {
        let snapshot = TicketSnapshot::from_station_ticket(order, ticket);
        self.dispatch(
            &ticket.station_id,
            TicketType::Station,
            Some(ticket.station_id.clone()),
            snapshot,
        )
    }

    fn dispatch(
        &self,
        role: &str,
        ticket_type: TicketType,
        station_id: Option<String>,
        ticket: TicketSnapshot,
    ) -> DispatchResult<PrintJob> {
        let config = self
            .registry
            .config_for_role(role)
            .ok_or_else(|| DispatchError::PrinterNotConfigured(role.to_uppercase()))?;

        let job = PrintJob {
            printer_type: config.printer_type.clone(),
            printer_target: config.printer_target.clone(),
            ticket_type,
            station_id,
            ticket,
        };

        match self.job_tx.send(job.clone()) {
            Ok(receivers) => {
                tracing::info!(
                    printer_type = %job.printer_type,
                    printer_target = %job.printer_target,
                    order_id = job.ticket.order_id,
                    receivers,
                    "Print job dispatched"
                );
                Ok(job)
            }
            Err(e) => {
                // 状态绝不因打印失败回滚；记录并上报
                tracing::warn!(
                    printer_target = %job.printer_target,
                    order_id = job.ticket.order_id,
                    error = %e,
                    "Print job publish failed"
                );
                Err(DispatchError::ChannelClosed(e.to_string()))
            }
        }
    }
}
